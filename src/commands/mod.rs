//! Command implementations
//!
//! Commands are methods on `Repository`, organized into two categories:
//!
//! - `plumbing`: Low-level views of git's data (hash-object, ls-tree, status)
//! - `porcelain`: User-facing operations (diff, save)

pub mod plumbing;
pub mod porcelain;
