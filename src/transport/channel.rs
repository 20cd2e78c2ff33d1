//! In-process transport over tokio channels

use super::{OutboundMessage, Transport, TransportError, TransportMode};
use crate::core::BarEvent;
use log::warn;
use serde_json::Value;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Bar side of an in-process transport
pub struct ChannelTransport {
    messages: UnboundedReceiver<Value>,
    requests: UnboundedSender<OutboundMessage>,
    mode: TransportMode,
}

/// Collector side of an in-process transport
pub struct ChannelHandle {
    messages: UnboundedSender<Value>,
    requests: UnboundedReceiver<OutboundMessage>,
}

/// Create a connected transport and handle pair
pub fn channel_transport(mode: TransportMode) -> (ChannelTransport, ChannelHandle) {
    let (message_tx, message_rx) = unbounded_channel();
    let (request_tx, request_rx) = unbounded_channel();
    (
        ChannelTransport {
            messages: message_rx,
            requests: request_tx,
            mode,
        },
        ChannelHandle {
            messages: message_tx,
            requests: request_rx,
        },
    )
}

impl ChannelHandle {
    /// Deliver a wire message to the bar
    pub fn send(&self, message: Value) -> Result<(), TransportError> {
        self.messages.send(message).map_err(|_| TransportError::Closed)
    }

    /// Wait for the bar's next outbound message
    pub async fn next_request(&mut self) -> Option<OutboundMessage> {
        self.requests.recv().await
    }

    /// Outbound message already queued, if any
    pub fn try_next_request(&mut self) -> Option<OutboundMessage> {
        self.requests.try_recv().ok()
    }
}

impl Transport for ChannelTransport {
    fn mode(&self) -> TransportMode {
        self.mode
    }

    async fn recv(&mut self) -> Result<Option<BarEvent>, TransportError> {
        while let Some(message) = self.messages.recv().await {
            match BarEvent::from_message(message) {
                Some(event) => return Ok(Some(event)),
                None => warn!("Skipping non-object message"),
            }
        }
        Ok(None)
    }

    async fn request_update(&mut self) -> Result<(), TransportError> {
        self.requests
            .send(OutboundMessage::RequestUpdate)
            .map_err(|_| TransportError::Closed)
    }
}
