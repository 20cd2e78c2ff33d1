//! Transports delivering events from the metrics collector, and the event loop

mod channel;
mod runner;
mod stream;
mod ticker;

pub use channel::{channel_transport, ChannelHandle, ChannelTransport};
pub use runner::run_event_loop;
pub use stream::{StreamTransport, TcpTransport};
pub use ticker::spawn_clock_ticker;

use crate::core::BarEvent;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How updates reach the bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// The collector pushes updates unprompted
    Push,
    /// The bar requests each update
    #[default]
    Poll,
}

/// Transport failures
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transport closed")]
    Closed,
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Messages sent to the collector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    RequestUpdate,
}

/// Source of bar events
#[allow(async_fn_in_trait)]
pub trait Transport {
    fn mode(&self) -> TransportMode;

    /// Next inbound event; `Ok(None)` once the peer has closed.
    ///
    /// Must be cancel safe, since the event loop races it against timers.
    async fn recv(&mut self) -> Result<Option<BarEvent>, TransportError>;

    /// Ask the collector for a fresh update
    async fn request_update(&mut self) -> Result<(), TransportError>;
}
