//! Error types for the codec crate.

use thiserror::Error;

/// Errors that can occur when decoding an export string.
#[derive(Debug, Error)]
pub enum Error {
    /// The export is not valid base64 once the alphabet is normalized.
    #[error("invalid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    /// Every supported framing failed to inflate the payload.
    #[error("decompression failed for every framing ({attempts})")]
    Decompression { attempts: String },

    /// The inflated payload is not UTF-8.
    #[error("decompressed payload is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// I/O error while compressing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, Error>;
