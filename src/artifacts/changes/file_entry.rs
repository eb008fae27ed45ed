use crate::artifacts::path::clean_path::CleanPath;

/// One raw item of a recursive work tree walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEntry {
    /// Path relative to the scan root
    pub path: String,
    pub is_dir: bool,
}

impl ScanEntry {
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_dir: false,
        }
    }

    pub fn dir(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_dir: true,
        }
    }
}

/// A regular file found in the work tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub clean_path: CleanPath,
    pub raw_path: String,
}

impl FileEntry {
    pub fn try_new(raw_path: &str) -> anyhow::Result<Self> {
        Ok(Self {
            clean_path: CleanPath::try_parse(raw_path)?,
            raw_path: raw_path.to_string(),
        })
    }

    /// Keep the files of a scan, in scan order; directories are dropped
    pub fn from_scan(entries: &[ScanEntry]) -> anyhow::Result<Vec<Self>> {
        entries
            .iter()
            .filter(|entry| !entry.is_dir)
            .map(|entry| Self::try_new(&entry.path))
            .collect()
    }
}
