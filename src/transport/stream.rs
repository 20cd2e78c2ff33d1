//! Newline-delimited JSON over a byte stream

use super::{OutboundMessage, Transport, TransportError, TransportMode};
use crate::core::BarEvent;
use log::{debug, info, warn};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;

/// Transport reading one JSON message per line
pub struct StreamTransport<R, W> {
    lines: Lines<R>,
    writer: W,
    mode: TransportMode,
}

/// Stream transport over a TCP connection
pub type TcpTransport = StreamTransport<BufReader<OwnedReadHalf>, OwnedWriteHalf>;

impl<R, W> StreamTransport<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W, mode: TransportMode) -> Self {
        Self {
            lines: reader.lines(),
            writer,
            mode,
        }
    }
}

impl TcpTransport {
    /// Connect to a collector at `host:port`
    pub async fn connect(address: &str, mode: TransportMode) -> Result<Self, TransportError> {
        let stream = TcpStream::connect(address).await?;
        info!("Connected to {} ({:?} mode)", address, mode);
        let (reader, writer) = stream.into_split();
        Ok(Self::new(BufReader::new(reader), writer, mode))
    }
}

impl<R, W> Transport for StreamTransport<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    fn mode(&self) -> TransportMode {
        self.mode
    }

    async fn recv(&mut self) -> Result<Option<BarEvent>, TransportError> {
        while let Some(line) = self.lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<Value>(line) {
                Ok(message) => match BarEvent::from_message(message) {
                    Some(event) => return Ok(Some(event)),
                    None => warn!("Skipping non-object message"),
                },
                Err(e) => warn!("Skipping malformed message: {}", e),
            }
        }
        debug!("Stream reached end of input");
        Ok(None)
    }

    async fn request_update(&mut self) -> Result<(), TransportError> {
        let mut line = serde_json::to_string(&OutboundMessage::RequestUpdate)?;
        line.push('\n');
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }
}
