//! Passive-tree node table parsing and node id linking.
//!
//! A build export lists allocated passive nodes by numeric id only. The
//! node table, parsed from the tree definitions file, maps those ids to a
//! display name and stat lines. [`link`] joins the two.
//!
//! # Example
//!
//! ```
//! use pobx_tree::{link, NodeTable};
//!
//! let table = NodeTable::parse(r#"nodes={[1]={skill=1001,name="Strength",stats={"+10 to Strength"}}}"#)?;
//! let linked = link(&["1001".to_string(), "7".to_string()], &table)?;
//!
//! assert_eq!(linked.get(1001).unwrap().name(), "Strength");
//! assert!(linked.get(7).unwrap().is_unknown());
//! # Ok::<(), pobx_tree::Error>(())
//! ```

mod error;
mod link;
mod table;

pub use error::{Error, Result};
pub use link::{link, link_record, parse_node_id};
pub use table::{NodeTable, NODES_MARKER};
