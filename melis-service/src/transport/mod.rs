//! # Transport
//!
//! The serial link to the network co-processor is reached through a
//! [`Gateway`]. A [`Multiplexer`] shares that link between concurrent
//! commands and delivers callbacks to listeners.

use bytes::Bytes;
use tokio::sync::mpsc;
use tracing::error;

use crate::{Error, Result};

mod multiplexer;

pub use multiplexer::{
    Callback, FrameDisposition, Listener, ListenerId, ListenerResult, Multiplexer, PendingReply,
    Response,
};

/// Link to the network co-processor
///
/// Frames handed to the gateway are complete EZSP frames, the gateway adds
/// the serial framing. Received frames are fed back through
/// [`Multiplexer::on_frame_received`].
pub trait Gateway: Send + Sync {
    /// Queue a frame for transmission
    fn send(&self, frame: Bytes) -> Result<()>;
    /// Reset the link
    fn reset(&self) -> Result<()>;
    /// Close the link
    fn close(&self);
}

/// Event forwarded by a [`ChannelGateway`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GatewayEvent {
    /// Frame to transmit
    Frame(Bytes),
    /// Reset requested
    Reset,
    /// Close requested
    Close,
}

/// Gateway forwarding every request into a channel
///
/// The receiving end is owned by the task driving the serial port.
#[derive(Clone, Debug)]
pub struct ChannelGateway {
    sender: mpsc::UnboundedSender<GatewayEvent>,
}

impl ChannelGateway {
    /// Create a gateway and the receiver of its events
    pub fn new() -> (Self, mpsc::UnboundedReceiver<GatewayEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    fn forward(&self, event: GatewayEvent) -> Result<()> {
        self.sender
            .send(event)
            .map_err(|_| Error::Gateway("receiver dropped".into()))
    }
}

impl Gateway for ChannelGateway {
    fn send(&self, frame: Bytes) -> Result<()> {
        self.forward(GatewayEvent::Frame(frame))
    }

    fn reset(&self) -> Result<()> {
        self.forward(GatewayEvent::Reset)
    }

    fn close(&self) {
        if let Err(e) = self.forward(GatewayEvent::Close) {
            error!("Failed to close gateway, {}", e);
        }
    }
}
