use crate::artifacts::changes::file_entry::ScanEntry;
use crate::artifacts::path::METADATA_DIR;
use anyhow::Context;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// The work tree on disk
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_metadata_dir(entry: &DirEntry) -> bool {
        entry.depth() == 1 && entry.file_name() == METADATA_DIR
    }

    /// Every file and directory below the root, relative to it, in name order
    ///
    /// The top-level metadata directory is never descended into.
    pub fn scan(&self) -> anyhow::Result<Vec<ScanEntry>> {
        let mut entries = Vec::new();

        for entry in WalkDir::new(&self.path)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !Self::is_metadata_dir(entry))
        {
            let entry = entry.with_context(|| format!("Failed to scan {:?}", self.path))?;
            let relative = entry
                .path()
                .strip_prefix(&self.path)
                .with_context(|| format!("Scanned path escapes the root: {:?}", entry.path()))?;
            let relative = relative
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("path is not valid UTF-8: {:?}", relative))?;

            entries.push(ScanEntry {
                path: relative.to_string(),
                is_dir: entry.file_type().is_dir(),
            });
        }
        tracing::debug!(entries = entries.len(), root = ?self.path, "scanned work tree");

        Ok(entries)
    }

    /// Copy a work tree file to `target`, creating its parent directories
    pub fn copy_file(&self, file_path: &Path, target: &Path) -> anyhow::Result<PathBuf> {
        let source = self.path.join(file_path);

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        std::fs::copy(&source, target)
            .with_context(|| format!("Failed to copy {:?} to {:?}", source, target))?;

        Ok(target.to_path_buf())
    }
}
