//! Porcelain commands
//!
//! User-facing operations composed from the repository areas.
//!
//! ## Commands
//!
//! - `diff`: Show how the work tree differs from HEAD
//! - `save`: Write the changed files and a manifest to a destination

pub mod diff;
pub mod save;
