use crate::artifacts::path::clean::{clean, ensure_valid_for_storage, is_local};
use crate::artifacts::path::segment::{names, tokenize};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Canonical, storage-safe, relative path
///
/// Built from a raw relative path by cleaning it and validating every name.
/// Two entries refer to the same file exactly when their clean paths are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CleanPath(String);

impl CleanPath {
    /// Clean and validate a raw relative path
    ///
    /// # Returns
    ///
    /// The canonical path, or an error if it is absolute, escapes its base
    /// or contains a name outside the storage allow-list
    pub fn try_parse(raw: &str) -> anyhow::Result<Self> {
        if !is_local(raw) {
            anyhow::bail!("path is absolute or escapes its root: {:?}", raw);
        }

        let cleaned = clean(raw);
        ensure_valid_for_storage(&cleaned)?;

        Ok(Self(cleaned))
    }

    /// Names of the path, separators stripped
    pub fn segments(&self) -> Vec<&str> {
        names(&tokenize(&self.0))
    }

    /// First name of the path
    pub fn first_segment(&self) -> Option<&str> {
        self.segments().first().copied()
    }

    /// Whether `prefix` names this path or one of its ancestor directories
    pub fn starts_with_segments(&self, prefix: &[String]) -> bool {
        let segments = self.segments();
        prefix.len() <= segments.len() && segments.iter().zip(prefix).all(|(a, b)| *a == b)
    }

    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }
}

impl AsRef<str> for CleanPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<Path> for CleanPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl std::fmt::Display for CleanPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
