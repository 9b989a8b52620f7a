//! Error types for node table parsing and linking.

use std::num::ParseIntError;

use thiserror::Error;

/// Errors that can occur when reading a node table or linking node ids.
#[derive(Debug, Error)]
pub enum Error {
    /// The node table text does not have the expected shape.
    #[error("node table format error: {0}")]
    Format(String),

    /// A passive-tree node id is not an integer.
    #[error("malformed node id {id:?}: {source}")]
    MalformedId {
        id: String,
        #[source]
        source: ParseIntError,
    },
}

/// Result type for node table operations.
pub type Result<T> = std::result::Result<T, Error>;
