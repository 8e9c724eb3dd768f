//! Duplex transport traits.
//!
//! The channel consumes a WebSocket-like transport through these traits;
//! concrete sockets live outside this crate. An implementation must
//! return the connection handle from [`DuplexTransport::open`] before it
//! delivers any listener event for that connection.

use std::sync::Arc;

use crate::error::WebSocketError;

/// Receiver of transport events for one connection.
pub trait DuplexListener: Send + Sync {
    /// The connection finished its handshake and is ready for traffic.
    fn on_open(&self);

    /// A text message arrived.
    fn on_message(&self, text: &str);

    /// The peer closed the connection.
    fn on_close(&self, reason: &str);

    /// The connection failed.
    fn on_failure(&self, message: &str);
}

/// An open duplex connection.
pub trait DuplexConnection: Send + Sync {
    /// Send a text message.
    ///
    /// Must not invoke the connection's listener from within the call;
    /// incoming traffic is delivered from the transport's own context.
    fn send(&self, text: &str) -> Result<(), WebSocketError>;

    /// Close the connection.
    fn close(&self) -> Result<(), WebSocketError>;
}

/// Factory opening duplex connections.
pub trait DuplexTransport: Send + Sync {
    /// Open a connection to `uri`, delivering events to `listener`.
    fn open(
        &self,
        uri: &str,
        listener: Arc<dyn DuplexListener>,
    ) -> Result<Arc<dyn DuplexConnection>, WebSocketError>;
}
