//! Error types for segment storage.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during segment storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A segment file does not hold the records its entry promises.
    #[error("segment corrupted: {path}: {message}")]
    Corrupted {
        /// Path of the offending segment.
        path: PathBuf,
        /// Description of the corruption.
        message: String,
    },

    /// A segment file is not valid UTF-8 text.
    #[error("segment is not valid UTF-8: {0}")]
    InvalidUtf8(PathBuf),
}

impl StorageError {
    /// Creates a corruption error.
    pub fn corrupted(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Corrupted {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` when the error means the file no longer exists.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == io::ErrorKind::NotFound)
    }
}
