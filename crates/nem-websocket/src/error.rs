//! Error types for the subscription channel.

/// Errors that can occur on the subscription channel.
#[derive(Debug, thiserror::Error)]
pub enum WebSocketError {
    /// A frame or response body could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// The channel or connection is closed.
    #[error("channel closed: {0}")]
    Closed(String),

    /// The underlying transport failed.
    #[error("transport error: {0}")]
    Transport(String),
}
