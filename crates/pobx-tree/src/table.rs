//! Node table parsing.
//!
//! The definitions file is a Lua data table, not JSON. The parser only
//! understands as much of it as it needs: the `nodes={ ... }` region, the
//! `[n] = { ... }` entries inside it, and three fields per entry.
//!
//! ```text
//! nodes={
//!     [1]={ skill=1001, name="Strength", stats={ "+10 to Strength" } },
//!     [2]={ skill=1002, name="Dexterity" },
//! }
//! ```

use std::sync::OnceLock;

use pobx_common::{NodeEntry, NodeId, TextScanner};
use regex::Regex;
use rustc_hash::FxHashMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::{debug, info, trace, warn};

use crate::{Error, Result};

/// Literal that opens the node table region.
pub const NODES_MARKER: &str = "nodes={";

struct Patterns {
    /// `[<index>] = {`; the index is a table slot, not a node id.
    header: Regex,
    skill: Regex,
    name: Regex,
    stats: Regex,
    quoted: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        header: Regex::new(r"\[(\d+)\]\s*=\s*\{").expect("valid header pattern"),
        skill: Regex::new(r"\bskill\s*=\s*(\d+)").expect("valid skill pattern"),
        name: Regex::new(r#"\bname\s*=\s*"([^"]+)""#).expect("valid name pattern"),
        stats: Regex::new(r"(?s)\bstats\s*=\s*\{(.*?)\}").expect("valid stats pattern"),
        quoted: Regex::new(r#""([^"]+)""#).expect("valid string pattern"),
    })
}

/// Node id to name and stat descriptions.
///
/// Built once from the definitions text, then used as a read-only lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeTable {
    entries: FxHashMap<NodeId, NodeEntry>,
}

impl NodeTable {
    /// Parse the `nodes={...}` region of a definitions file.
    ///
    /// Fails with [`Error::Format`] only when the marker is missing. A region
    /// or entry that is never closed runs to the end of its enclosing text,
    /// minus the final character. Entries without a numeric `skill` or a
    /// quoted `name` are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut scanner = TextScanner::new(text);
        if !scanner.skip_past(NODES_MARKER) {
            return Err(Error::Format(format!("could not find `{}`", NODES_MARKER)));
        }

        let region = match scanner.read_block() {
            Ok(region) => region,
            Err(e) => {
                warn!(error = %e, "nodes region never closed");
                without_last_char(scanner.remaining_text())
            }
        }
        .trim();

        let mut table = Self::default();
        let mut cursor = TextScanner::new(region);
        let mut skipped = 0usize;

        while let Some(header) = patterns().header.find(cursor.remaining_text()) {
            cursor.seek(cursor.position() + header.end());

            let body = match cursor.read_block() {
                Ok(body) => body,
                Err(e) => {
                    debug!(error = %e, "unterminated node entry");
                    let rest = without_last_char(cursor.remaining_text());
                    cursor.seek(cursor.len());
                    rest
                }
            };

            match parse_entry(body) {
                Some((id, entry)) => {
                    trace!(id, name = entry.name(), stats = entry.stats().len(), "node entry");
                    table.entries.insert(id, entry);
                }
                None => skipped += 1,
            }
        }

        info!(nodes = table.len(), skipped, "node table parsed");
        Ok(table)
    }

    /// Look up a node by id.
    pub fn get(&self, id: NodeId) -> Option<&NodeEntry> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by node id.
    pub fn sorted(&self) -> Vec<(NodeId, &NodeEntry)> {
        let mut entries: Vec<_> = self.entries.iter().map(|(id, e)| (*id, e)).collect();
        entries.sort_unstable_by_key(|(id, _)| *id);
        entries
    }
}

impl Serialize for NodeTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let sorted = self.sorted();
        let mut map = serializer.serialize_map(Some(sorted.len()))?;
        for (id, entry) in sorted {
            map.serialize_entry(&id, entry)?;
        }
        map.end()
    }
}

/// An unclosed block's body: everything left, less the closing brace slot.
fn without_last_char(text: &str) -> &str {
    match text.char_indices().next_back() {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

/// Read `skill`, `name` and `stats` from one entry body.
fn parse_entry(body: &str) -> Option<(NodeId, NodeEntry)> {
    let p = patterns();

    let Some(skill) = p.skill.captures(body) else {
        debug!("entry without skill id skipped");
        return None;
    };
    let Some(name) = p.name.captures(body) else {
        debug!(skill = &skill[1], "entry without name skipped");
        return None;
    };

    let id = match skill[1].parse::<NodeId>() {
        Ok(id) => id,
        Err(e) => {
            debug!(skill = &skill[1], error = %e, "entry with out-of-range skill id skipped");
            return None;
        }
    };

    let stats = p
        .stats
        .captures(body)
        .map(|block| {
            p.quoted
                .captures_iter(&block[1])
                .map(|c| c[1].to_string())
                .collect()
        })
        .unwrap_or_default();

    Some((id, NodeEntry::new(&name[1], stats)))
}
