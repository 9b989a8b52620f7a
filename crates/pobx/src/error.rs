//! Error types for the pipeline.

use std::fmt;

use thiserror::Error;

/// Pipeline stage an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Decode,
    Extract,
    NodeTable,
    Output,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Decode => "decode",
            Stage::Extract => "extract",
            Stage::NodeTable => "node table",
            Stage::Output => "output",
        })
    }
}

/// Errors that can occur while running the pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// Export string could not be turned into XML text.
    #[error("decode stage: {0}")]
    Codec(#[from] pobx_codec::Error),

    /// XML text could not be parsed.
    #[error("extract stage: {0}")]
    Xml(#[from] pobx_xml::Error),

    /// Node table could not be parsed, or a node id could not be linked.
    #[error("node table stage: {0}")]
    Tree(#[from] pobx_tree::Error),

    /// Output could not be serialized.
    #[error("output stage: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// The stage that failed.
    pub fn stage(&self) -> Stage {
        match self {
            Error::Codec(_) => Stage::Decode,
            Error::Xml(_) => Stage::Extract,
            Error::Tree(_) => Stage::NodeTable,
            Error::Json(_) => Stage::Output,
        }
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
