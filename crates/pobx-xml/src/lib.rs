//! Build record extraction from Path of Building XML.
//!
//! A decoded export is an XML document rooted at `PathOfBuilding2` (or
//! `PathOfBuilding`). This crate parses it into an owned [`Element`] tree and
//! offers two independent ways to read it:
//!
//! - [`extract`] - schema-aware: picks player info, stats, passive-tree node
//!   ids, skills and items into a [`BuildRecord`]
//! - [`extract_generic`] - schema-agnostic: captures every element,
//!   attribute and leaf text as a JSON tree
//!
//! The two outputs are not cross-checked against each other.
//!
//! # Example
//!
//! ```
//! use pobx_xml::{parse_document, extract};
//!
//! let root = parse_document(r#"<PathOfBuilding2><Build level="90"/></PathOfBuilding2>"#)?;
//! let record = extract(&root);
//! assert_eq!(record.player_info.level, "90");
//! # Ok::<(), pobx_xml::Error>(())
//! ```

mod element;
mod error;

pub mod extract;
pub mod generic;

pub use element::{parse_document, Element, Iter};
pub use error::{Error, Result};
pub use extract::extract;
pub use generic::extract_generic;

use pobx_common::BuildRecord;

/// Which extraction strategy to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtractionMode {
    /// Field-targeted [`BuildRecord`].
    #[default]
    Structured,
    /// Full-fidelity JSON tree of the document.
    Generic,
}

/// Output of one extraction run.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Structured(BuildRecord),
    Generic(serde_json::Value),
}

/// Run the selected strategy over a parsed document.
pub fn extract_with(root: &Element, mode: ExtractionMode) -> Extraction {
    match mode {
        ExtractionMode::Structured => Extraction::Structured(extract(root)),
        ExtractionMode::Generic => Extraction::Generic(extract_generic(root)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes_share_one_document() {
        let root = parse_document(r#"<PathOfBuilding2><Build level="3"/></PathOfBuilding2>"#).unwrap();

        match extract_with(&root, ExtractionMode::Structured) {
            Extraction::Structured(record) => assert_eq!(record.player_info.level, "3"),
            other => panic!("expected structured output, got {:?}", other),
        }

        match extract_with(&root, ExtractionMode::Generic) {
            Extraction::Generic(tree) => {
                assert_eq!(tree["PathOfBuilding2"]["Build"]["@attributes"]["level"], "3")
            }
            other => panic!("expected generic output, got {:?}", other),
        }
    }
}
