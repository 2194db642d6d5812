use thiserror::Error;

/// Errors reported by the algorithms in this crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A known-answer self-check vector did not reproduce its expected digest.
    /// A failing self-check means the build's digest output must not be trusted.
    #[error("self-check vector {index} failed: expected {expected}, got {actual}")]
    SelfCheckFailed {
        index: usize,
        expected: String,
        actual: String,
    },

    /// Paired input slices had different lengths.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
}

/// Result type for operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;
