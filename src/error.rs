//! Error types for audio decoding and shape normalization

use std::fmt;

/// Errors that can occur while decoding or reshaping audio
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Invalid input parameters (empty contents, inconsistent grid dimensions)
    InvalidInput(String),

    /// Audio decoding error reported by the codec backend
    DecodingError(String),

    /// Container or codec not accepted by the requested decode path
    UnsupportedFormat(String),

    /// Channel expansion requested from a source that cannot be replicated
    ///
    /// Only a single-row source can be widened; any other row count must
    /// already match the target.
    ChannelBroadcast {
        /// Channel count after truncation
        source: usize,
        /// Requested channel count
        target: usize,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            DecodeError::DecodingError(msg) => write!(f, "Decoding error: {}", msg),
            DecodeError::UnsupportedFormat(msg) => write!(f, "Unsupported format: {}", msg),
            DecodeError::ChannelBroadcast { source, target } => write!(
                f,
                "Cannot broadcast {} channel(s) to {} channels: only a single channel can be replicated",
                source, target
            ),
        }
    }
}

impl std::error::Error for DecodeError {}

impl From<symphonia::core::errors::Error> for DecodeError {
    fn from(err: symphonia::core::errors::Error) -> Self {
        use symphonia::core::errors::Error;

        match err {
            Error::Unsupported(what) => DecodeError::UnsupportedFormat(what.to_string()),
            other => DecodeError::DecodingError(other.to_string()),
        }
    }
}
