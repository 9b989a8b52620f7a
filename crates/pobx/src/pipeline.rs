//! End-to-end pipeline: export string to linked build record.

use pobx_common::BuildRecord;
use pobx_tree::NodeTable;
use pobx_xml::{Element, Extraction, ExtractionMode};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::debug;

use crate::Result;

/// Decode an export string (surrounding whitespace ignored) to XML text.
pub fn decode_export(export: &str) -> Result<String> {
    Ok(pobx_codec::decode(export.trim())?)
}

/// Decode an export string and run one extraction strategy over it.
pub fn extract_export(export: &str, mode: ExtractionMode) -> Result<Extraction> {
    let root = parse_export(export)?;
    debug!(root = %root.tag, ?mode, "document parsed");
    Ok(pobx_xml::extract_with(&root, mode))
}

fn parse_export(export: &str) -> Result<Element> {
    let xml = decode_export(export)?;
    Ok(pobx_xml::parse_document(&xml)?)
}

/// Serialize a value as pretty JSON with four-space indentation.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut output = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut output, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    // serde_json only writes UTF-8.
    Ok(String::from_utf8_lossy(&output).into_owned())
}

/// Full decode, extract and link run against one node table.
///
/// The table is parsed once and shared read-only across runs.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    table: NodeTable,
}

impl Pipeline {
    /// Create a pipeline over an already-parsed node table.
    pub fn new(table: NodeTable) -> Self {
        Self { table }
    }

    /// Parse the definitions text and create a pipeline over its node table.
    pub fn from_definitions(definitions: &str) -> Result<Self> {
        Ok(Self::new(NodeTable::parse(definitions)?))
    }

    /// The node table used for linking.
    pub fn table(&self) -> &NodeTable {
        &self.table
    }

    /// Decode, extract and link one export.
    ///
    /// Nothing partial is returned: any failing stage fails the whole run.
    pub fn run(&self, export: &str) -> Result<BuildRecord> {
        let root = parse_export(export)?;
        let mut record = pobx_xml::extract(&root);
        pobx_tree::link_record(&mut record, &self.table)?;
        Ok(record)
    }
}
