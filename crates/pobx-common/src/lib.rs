//! Common utilities for pobx.
//!
//! This crate provides foundational types and utilities used across all pobx crates:
//!
//! - [`model`] - The structured build record and its parts
//! - [`defaults`] - The single place where missing-value defaults are decided
//! - [`TextScanner`] - Cursor-based scanning over bespoke text formats

mod error;
mod scanner;

pub mod defaults;
pub mod model;

pub use error::{Error, Result};
pub use model::{
    BuildRecord, Gem, Item, LinkedNodes, NodeEntry, NodeId, PassiveNodes, PassiveTree,
    PlayerInfo, PlayerStats, Skill,
};
pub use scanner::TextScanner;
