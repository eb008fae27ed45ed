//! Capture the uncommitted changes of a git work tree as a self-contained changeset
//!
//! - `areas`: git process, work tree, settings and changeset destination
//! - `artifacts`: pure data types and the reconciliation algorithm
//! - `commands`: plumbing and porcelain operations on `Repository`

pub mod areas;
pub mod artifacts;
pub mod commands;
