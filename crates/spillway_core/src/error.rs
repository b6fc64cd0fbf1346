//! Error types for Spillway core.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in Spillway core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Segment storage error.
    #[error("storage error: {0}")]
    Storage(#[from] spillway_storage::StorageError),

    /// Record codec error.
    #[error("codec error: {0}")]
    Codec(#[from] spillway_codec::CodecError),
}

impl CoreError {
    /// Returns `true` if the error means a segment file vanished.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_not_found())
    }
}
