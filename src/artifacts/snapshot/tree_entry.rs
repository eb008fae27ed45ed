use crate::artifacts::hashing::checksum::Checksum;
use crate::artifacts::objects::file_mode::FileMode;
use crate::artifacts::objects::object_kind::ObjectKind;
use crate::artifacts::path::clean::is_local;
use crate::artifacts::path::clean_path::CleanPath;
use crate::artifacts::snapshot::FIELD_SEPARATOR;
use anyhow::Context;
use serde::Serialize;

/// A tracked file as recorded by HEAD
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedBlob {
    pub clean_path: CleanPath,
    /// Path exactly as git printed it
    #[serde(rename = "path")]
    pub raw_path: String,
    pub checksum: Checksum,
    pub mode: FileMode,
}

/// A submodule commit recorded in place of a subtree
///
/// Submodules are never compared against the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submodule {
    pub dir_clean_path: CleanPath,
    pub dir_raw_path: String,
    pub checksum: Checksum,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEntry {
    Blob(TrackedBlob),
    Submodule(Submodule),
}

impl TreeEntry {
    /// Parse one `kind|>id|>path|>mode` record
    pub fn parse_line(line: &str) -> anyhow::Result<Self> {
        Self::parse_fields(line).with_context(|| format!("Invalid line from git: {:?}", line))
    }

    fn parse_fields(line: &str) -> anyhow::Result<Self> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        let [kind, checksum, path, mode] = fields.as_slice() else {
            anyhow::bail!("expected 4 fields, found {}", fields.len());
        };
        if [checksum, path, mode].iter().any(|field| field.is_empty()) {
            anyhow::bail!("empty field");
        }

        let checksum = Checksum::try_parse(checksum.to_string())?;
        let mode = FileMode::try_parse(mode)?;
        if !is_local(path) {
            anyhow::bail!("path is absolute or escapes the work tree: {:?}", path);
        }

        match ObjectKind::try_from(*kind) {
            Ok(ObjectKind::Commit) => {
                if mode != FileMode::Submodule {
                    anyhow::bail!("submodule with mode {}", mode);
                }

                Ok(TreeEntry::Submodule(Submodule {
                    dir_clean_path: CleanPath::try_parse(path)?,
                    dir_raw_path: path.to_string(),
                    checksum,
                }))
            }
            Ok(ObjectKind::Blob) => Ok(TreeEntry::Blob(TrackedBlob {
                clean_path: CleanPath::try_parse(path)?,
                raw_path: path.to_string(),
                checksum,
                mode,
            })),
            _ => anyhow::bail!("unsupported object kind: {:?}", kind),
        }
    }
}

impl std::fmt::Display for TreeEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeEntry::Blob(blob) => write!(
                f,
                "{} {} {}\t{}",
                blob.mode,
                ObjectKind::Blob,
                blob.checksum,
                blob.clean_path
            ),
            TreeEntry::Submodule(submodule) => write!(
                f,
                "{} {} {}\t{}",
                FileMode::Submodule,
                ObjectKind::Commit,
                submodule.checksum,
                submodule.dir_clean_path
            ),
        }
    }
}

/// Every tracked entry of HEAD, split by kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeSnapshot {
    pub blobs: Vec<TrackedBlob>,
    pub submodules: Vec<Submodule>,
}

impl TreeSnapshot {
    /// Parse NUL-terminated `ls-tree -z` output; empty output is an empty tree
    pub fn parse_output(output: &str) -> anyhow::Result<Self> {
        let output = output.trim_end_matches('\0');
        let mut snapshot = Self::default();

        if output.is_empty() {
            return Ok(snapshot);
        }

        for line in output.split('\0') {
            match TreeEntry::parse_line(line)? {
                TreeEntry::Blob(blob) => snapshot.blobs.push(blob),
                TreeEntry::Submodule(submodule) => snapshot.submodules.push(submodule),
            }
        }

        Ok(snapshot)
    }

    /// Entries in listing order, blobs first
    pub fn entries(&self) -> impl Iterator<Item = TreeEntry> + '_ {
        self.blobs
            .iter()
            .cloned()
            .map(TreeEntry::Blob)
            .chain(self.submodules.iter().cloned().map(TreeEntry::Submodule))
    }
}
