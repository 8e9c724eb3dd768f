//! Error types for NIS API operations.

/// Errors that can occur when interacting with a NIS node.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to deserialize a response body.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Server returned a non-2xx response.
    #[error("server error ({status_code}): {message}")]
    Server {
        /// HTTP status code.
        status_code: u16,
        /// Error message from the server.
        message: String,
    },
}
