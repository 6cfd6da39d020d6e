/// Convenience result type used across the crate.
pub type ReelResult<T> = Result<T, ReelError>;

/// Error taxonomy for a single puzzle/reel generation request.
///
/// Every variant is fatal for the request that produced it. Nothing is retried internally.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Malformed grid, invalid cutpoints or an unusable configuration.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Unreadable input or unwritable output.
    #[error("io error: {0}")]
    Io(String),

    /// The encoder rejected the frame stream or could not be run.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`ReelError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Build a [`ReelError::Encoding`] value.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
