//! Error types for pobx-common.

use thiserror::Error;

/// Common error type for pobx operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A `{` was opened but the text ended before it was closed.
    #[error("unbalanced braces: block opened at byte {opened_at} still {depth} deep at end of text")]
    UnbalancedBraces { opened_at: usize, depth: usize },
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
