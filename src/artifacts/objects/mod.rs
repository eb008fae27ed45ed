//! Object vocabulary shared by tree snapshots and status records
//!
//! - `object_kind`: blob, tree or commit
//! - `file_mode`: octal entry modes and which of them can be diffed

use crate::artifacts::objects::file_mode::FileMode;

pub mod file_mode;
pub mod object_kind;

pub const MODES: phf::Map<&'static str, FileMode> = phf::phf_map! {
    "100644" => FileMode::File,
    "100755" => FileMode::Executable,
    "120000" => FileMode::Symlink,
    "160000" => FileMode::Submodule,
    "000000" => FileMode::Deleted,
    "40000" => FileMode::Directory,
    "040000" => FileMode::Directory,
};
