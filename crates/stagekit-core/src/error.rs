//! Errors reported by media collaborators.

use thiserror::Error;

/// Failure reported while decoding or playing media.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MediaError {
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Autoplay rejected: {0}")]
    AutoplayRejected(String),
    #[error("Unsupported media: {0}")]
    Unsupported(String),
}

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;
