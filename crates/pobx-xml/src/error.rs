//! Error types for XML parsing and extraction.

use thiserror::Error;

/// Errors that can occur when reading a build document.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed markup.
    #[error("XML error at byte {position}: {message}")]
    Xml { position: u64, message: String },

    /// The document parsed but has no usable structure.
    #[error("format error: {0}")]
    Format(String),
}

/// Result type for XML operations.
pub type Result<T> = std::result::Result<T, Error>;
