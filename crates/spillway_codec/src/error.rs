//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur during encoding or decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Failed to encode an item to a record.
    #[error("encoding failed: {message}")]
    EncodingFailed {
        /// Description of the encoding error.
        message: String,
    },

    /// Failed to decode a record back into an item.
    #[error("decoding failed at record {index}: {message}")]
    DecodingFailed {
        /// Position of the offending record within its segment.
        index: usize,
        /// Description of the decoding error.
        message: String,
    },

    /// An encoded record contained a line break.
    #[error("record contains a line break")]
    EmbeddedNewline,
}

impl CodecError {
    /// Create an encoding failed error.
    pub fn encoding_failed(message: impl Into<String>) -> Self {
        Self::EncodingFailed {
            message: message.into(),
        }
    }

    /// Create a decoding failed error.
    pub fn decoding_failed(index: usize, message: impl Into<String>) -> Self {
        Self::DecodingFailed {
            index,
            message: message.into(),
        }
    }
}
