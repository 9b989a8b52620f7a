//! Resolving passive-tree node ids against the node table.

use pobx_common::{BuildRecord, LinkedNodes, NodeEntry, NodeId, PassiveNodes};
use tracing::{info, warn};

use crate::{Error, NodeTable, Result};

/// Parse a raw node id as it appears in the export.
pub fn parse_node_id(raw: &str) -> Result<NodeId> {
    raw.trim().parse().map_err(|source| Error::MalformedId {
        id: raw.to_string(),
        source,
    })
}

/// Resolve each raw id to its table entry.
///
/// Ids the table does not know map to [`NodeEntry::unknown`]; they are
/// expected whenever the definitions lag behind the export. A non-numeric
/// id fails with [`Error::MalformedId`].
pub fn link(node_ids: &[String], table: &NodeTable) -> Result<LinkedNodes> {
    let mut linked = LinkedNodes::new();
    let mut misses = 0usize;

    for raw in node_ids {
        let id = parse_node_id(raw)?;
        let entry = match table.get(id) {
            Some(entry) => entry.clone(),
            None => {
                misses += 1;
                NodeEntry::unknown()
            }
        };
        linked.insert(id, entry);
    }

    if misses > 0 {
        warn!(misses, total = node_ids.len(), "node ids missing from the node table");
    }
    info!(nodes = linked.len(), "passive tree linked");

    Ok(linked)
}

/// Replace the record's raw node list with the linked mapping.
///
/// A record that is already linked is left as is.
pub fn link_record(record: &mut BuildRecord, table: &NodeTable) -> Result<()> {
    if let PassiveNodes::Raw(ids) = &record.passive_tree.nodes {
        let linked = link(ids, table)?;
        record.passive_tree.nodes = PassiveNodes::Linked(linked);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> NodeTable {
        NodeTable::parse(r#"nodes={[1]={skill=1001,name="Strength",stats={"+10 to Strength"}}}"#).unwrap()
    }

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_hit_and_miss() {
        let linked = link(&ids(&["1001", "4242"]), &table()).unwrap();
        assert_eq!(linked.len(), 2);
        assert_eq!(linked.get(1001).unwrap().name(), "Strength");
        assert_eq!(linked.get(1001).unwrap().stats(), ["+10 to Strength"]);
        assert!(linked.get(4242).unwrap().is_unknown());
    }

    #[test]
    fn test_order_of_first_appearance() {
        let linked = link(&ids(&["9", "1001", "9"]), &table()).unwrap();
        let order: Vec<_> = linked.iter().map(|(id, _)| id).collect();
        assert_eq!(order, [9, 1001]);
    }

    #[test]
    fn test_malformed_id() {
        match link(&ids(&["1001", "abc"]), &table()) {
            Err(Error::MalformedId { id, .. }) => assert_eq!(id, "abc"),
            other => panic!("expected malformed id, got {:?}", other),
        }
        assert!(matches!(link(&ids(&[""]), &table()), Err(Error::MalformedId { .. })));
    }

    #[test]
    fn test_empty_table_marks_everything_unknown() {
        let linked = link(&ids(&["1", "2"]), &NodeTable::default()).unwrap();
        assert!(linked.iter().all(|(_, entry)| entry.is_unknown()));
    }

    #[test]
    fn test_link_record() {
        let mut record = BuildRecord::default();
        record.passive_tree.nodes = PassiveNodes::Raw(ids(&["1001"]));
        link_record(&mut record, &table()).unwrap();

        match &record.passive_tree.nodes {
            PassiveNodes::Linked(linked) => assert_eq!(linked.get(1001).unwrap().name(), "Strength"),
            other => panic!("expected linked nodes, got {:?}", other),
        }

        // Linking twice is a no-op.
        let snapshot = record.clone();
        link_record(&mut record, &NodeTable::default()).unwrap();
        assert_eq!(record, snapshot);
    }
}
