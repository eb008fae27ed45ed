//! HEAD tree snapshot
//!
//! Records come from `git ls-tree -r -z` with a custom format, four fields
//! joined by `FIELD_SEPARATOR`: object kind, object id, path and mode.
//! Recursion means trees never appear; only blobs and submodule commits.

pub mod tree_entry;

pub const FIELD_SEPARATOR: &str = "|>";

/// Format string passed to `git ls-tree --format`
pub const LS_TREE_FORMAT: &str = "%(objecttype)|>%(objectname)|>%(path)|>%(objectmode)";
