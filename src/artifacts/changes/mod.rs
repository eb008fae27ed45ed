//! Classification of the work tree against HEAD
//!
//! - `file_entry`: files found by the work tree scan
//! - `change`: the closed set of change kinds
//! - `ignore`: tool and source control ignore rules
//! - `reconciler`: indexing, partitioning and classification
//! - `changeset`: presentation order of a finished run

pub mod change;
pub mod changeset;
pub mod file_entry;
pub mod ignore;
pub mod reconciler;
