//! pobx - Path of Building export decoding library.
//!
//! This crate provides a unified interface to the pobx crates and the
//! [`Pipeline`] that runs them end to end.
//!
//! # Crates
//!
//! - [`pobx_common`] - Build record model, default policy, text scanning
//! - [`pobx_codec`] - Export string decoding (base64url + deflate)
//! - [`pobx_xml`] - XML parsing, schema-aware and generic extraction
//! - [`pobx_tree`] - Node table parsing and node id linking
//!
//! # Example
//!
//! ```no_run
//! use pobx::prelude::*;
//!
//! let export = std::fs::read_to_string("build.txt")?;
//! let definitions = std::fs::read_to_string("tree.lua")?;
//!
//! let pipeline = Pipeline::from_definitions(&definitions)?;
//! let record = pipeline.run(&export)?;
//! println!("{}", pobx::to_json(&record)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod pipeline;

// Re-export all sub-crates
pub use pobx_codec as codec;
pub use pobx_common as common;
pub use pobx_tree as tree;
pub use pobx_xml as xml;

pub use error::{Error, Result, Stage};
pub use pipeline::{decode_export, extract_export, to_json, Pipeline};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{Error, Pipeline, Stage};
    pub use pobx_codec::Framing;
    pub use pobx_common::{
        BuildRecord, Gem, Item, LinkedNodes, NodeEntry, NodeId, PassiveNodes, PassiveTree,
        PlayerInfo, PlayerStats, Skill,
    };
    pub use pobx_tree::NodeTable;
    pub use pobx_xml::{Element, Extraction, ExtractionMode};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
