//! Path tokenization and canonicalization
//!
//! Paths are handled as byte strings split into segments:
//!
//! - `segment`: lossless tokenization into names and separator runs
//! - `clean`: platform clean semantics, storage validity and ancestry checks
//! - `clean_path`: validated canonical path newtype used across the crate
//!
//! Only the platform separator is recognised; no case folding is attempted.

pub mod clean;
pub mod clean_path;
pub mod segment;

/// Separator byte recognised by the tokenizer
pub const SEPARATOR: char = std::path::MAIN_SEPARATOR;
pub const SEPARATOR_STR: &str = std::path::MAIN_SEPARATOR_STR;

/// Name of the repository metadata directory
pub const METADATA_DIR: &str = ".git";

/// Characters allowed inside a single path name
pub const VALID_NAME_REGEX: &str = r"^[a-zA-Z0-9_.\-~@#$%^&=+{}\[\]:;,<>()]+$";
