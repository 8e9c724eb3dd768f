/// Error types for message encryption and decryption.
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    /// Underlying key or cipher failure.
    #[error("{0}")]
    Primitives(#[from] nem_primitives::PrimitivesError),

    /// The encrypted message is shorter than the mandatory prefix.
    #[error("message too short: expected at least {expected} bytes, got {actual} bytes")]
    MessageTooShort {
        /// Minimum length for a well-formed message.
        expected: usize,
        /// Actual length received.
        actual: usize,
    },
}
