//! Data types and algorithms
//!
//! Nothing in here touches git or spawns processes:
//!
//! - `changes`: reconciliation of the work tree against HEAD
//! - `core`: shared utilities (tracing setup)
//! - `hashing`: object ids and blob hashing
//! - `objects`: object kinds and file modes
//! - `path`: path tokenization, cleaning and validation
//! - `snapshot`: HEAD tree listing records
//! - `status`: porcelain v2 status records

pub mod changes;
pub mod core;
pub mod hashing;
pub mod objects;
pub mod path;
pub mod snapshot;
pub mod status;
