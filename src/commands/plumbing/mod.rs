//! Plumbing commands
//!
//! Direct views of the inputs a comparison is built from, mainly useful for
//! scripting and troubleshooting.
//!
//! ## Commands
//!
//! - `hash-object`: Compute the blob object id of a work tree file
//! - `ls-tree`: List the parsed entries of the HEAD tree
//! - `status`: List the parsed records of `git status`

pub mod hash_object;
pub mod ls_tree;
pub mod status;
