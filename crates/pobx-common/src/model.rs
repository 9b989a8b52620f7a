//! Structured build record.
//!
//! These types are what the schema-aware extractor produces and what the
//! linker rewrites. Field names and nesting match the JSON artifact.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::defaults::{self, UNKNOWN};

/// Passive-tree node identifier.
pub type NodeId = u64;

/// Character level, class and ascendancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerInfo {
    pub level: String,
    pub class: String,
    pub ascendancy: String,
}

impl Default for PlayerInfo {
    fn default() -> Self {
        Self {
            level: defaults::or_unknown(None),
            class: defaults::or_unknown(None),
            ascendancy: defaults::or_unknown(None),
        }
    }
}

/// Stat name to stat value, in document order.
///
/// Inserting an existing name replaces the value but keeps the position of
/// the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerStats {
    entries: Vec<(String, String)>,
}

impl PlayerStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a stat.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl Serialize for PlayerStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// A node table entry: display name and stat descriptions.
///
/// Serializes as `[name, [stat, ...]]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeEntry(pub String, pub Vec<String>);

impl NodeEntry {
    pub fn new(name: impl Into<String>, stats: Vec<String>) -> Self {
        Self(name.into(), stats)
    }

    /// Sentinel for ids the node table does not know.
    pub fn unknown() -> Self {
        Self(UNKNOWN.to_string(), Vec::new())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn stats(&self) -> &[String] {
        &self.1
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN && self.1.is_empty()
    }
}

/// Node id to entry, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkedNodes {
    entries: Vec<(NodeId, NodeEntry)>,
}

impl LinkedNodes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an entry, keeping the first position of a repeated id.
    pub fn insert(&mut self, id: NodeId, entry: NodeEntry) {
        match self.entries.iter_mut().find(|(i, _)| *i == id) {
            Some(existing) => existing.1 = entry,
            None => self.entries.push((id, entry)),
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&NodeEntry> {
        self.entries.iter().find(|(i, _)| *i == id).map(|(_, e)| e)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &NodeEntry)> {
        self.entries.iter().map(|(i, e)| (*i, e))
    }
}

impl Serialize for LinkedNodes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, entry) in &self.entries {
            map.serialize_entry(id, entry)?;
        }
        map.end()
    }
}

/// Passive-tree nodes, before or after linking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PassiveNodes {
    /// Raw id strings as they appear in the export.
    Raw(Vec<String>),
    /// Ids resolved against the node table.
    Linked(LinkedNodes),
}

impl Default for PassiveNodes {
    fn default() -> Self {
        Self::Raw(Vec::new())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PassiveTree {
    pub nodes: PassiveNodes,
}

/// A socket group and its gems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skill {
    pub label: String,
    pub enabled: String,
    pub gems: Vec<Gem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Gem {
    pub name: String,
    pub level: String,
    pub quality: String,
    pub enabled: String,
}

/// An item, with fields recovered heuristically from its text body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub rarity: String,
    pub level: String,
    pub required_level: String,
    pub quality: String,
    pub sockets: String,
    pub rune: String,
    pub modifiers: Vec<String>,
}

/// The complete structured record for one export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildRecord {
    #[serde(rename = "PlayerInfo")]
    pub player_info: PlayerInfo,
    #[serde(rename = "PlayerStats")]
    pub player_stats: PlayerStats,
    #[serde(rename = "PassiveTree")]
    pub passive_tree: PassiveTree,
    #[serde(rename = "Skills")]
    pub skills: Vec<Skill>,
    #[serde(rename = "Items")]
    pub items: Vec<Item>,
}
