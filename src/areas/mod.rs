//! Stateful collaborators of a run
//!
//! - `git`: the git binary, discovered and driven as a subprocess
//! - `hasher`: persistent `git hash-object` process
//! - `workspace`: the work tree on disk
//! - `settings`: user input checked into run settings
//! - `destination`: writes the changeset directory and its manifest
//! - `repository`: ties the above together for the commands

pub mod destination;
pub mod git;
pub mod hasher;
pub mod repository;
pub mod settings;
pub mod workspace;
