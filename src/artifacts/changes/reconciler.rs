//! Work tree versus HEAD reconciliation
//!
//! Files and blobs are indexed by clean path, partitioned into common,
//! workspace-only and repository-only groups, then each item is classified:
//!
//! 1. tool ignore rules (metadata directory, destination)
//! 2. source control ignores
//! 3. both sides present: rehash the file and compare with the blob
//! 4. blob only: deleted
//! 5. file only: added
//!
//! Any failure aborts the whole run; there are no partial results.

use crate::artifacts::changes::change::{Change, ChangeKind};
use crate::artifacts::changes::file_entry::FileEntry;
use crate::artifacts::changes::ignore::IgnoreRules;
use crate::artifacts::hashing::blob_hasher::BlobHasher;
use crate::artifacts::path::clean_path::CleanPath;
use crate::artifacts::snapshot::tree_entry::TrackedBlob;
use anyhow::Context;
use derive_new::new;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Default)]
pub struct Partition<'r> {
    pub common: Vec<(&'r FileEntry, &'r TrackedBlob)>,
    pub workspace_only: Vec<&'r FileEntry>,
    pub repository_only: Vec<&'r TrackedBlob>,
}

/// Map clean paths to items; two items with the same clean path are fatal
pub fn index_by_path<'r, T>(
    items: &'r [T],
    key: impl Fn(&'r T) -> &'r CleanPath,
) -> anyhow::Result<HashMap<&'r CleanPath, &'r T>> {
    let mut index = HashMap::with_capacity(items.len());

    for item in items {
        let path = key(item);
        if index.insert(path, item).is_some() {
            anyhow::bail!("duplicate path: {}", path);
        }
    }

    Ok(index)
}

/// Split files and blobs into disjoint groups, each in input order
pub fn partition<'r>(
    files: &'r [FileEntry],
    blobs: &'r [TrackedBlob],
) -> anyhow::Result<Partition<'r>> {
    let file_index = index_by_path(files, |file| &file.clean_path)?;
    let blob_index = index_by_path(blobs, |blob| &blob.clean_path)?;
    let mut partition = Partition::default();

    for file in files {
        match blob_index.get(&file.clean_path) {
            Some(&blob) => partition.common.push((file, blob)),
            None => partition.workspace_only.push(file),
        }
    }
    for blob in blobs {
        if !file_index.contains_key(&blob.clean_path) {
            partition.repository_only.push(blob);
        }
    }

    Ok(partition)
}

#[derive(new)]
pub struct Reconciler<'h> {
    root: &'h Path,
    hasher: &'h dyn BlobHasher,
    rules: &'h IgnoreRules,
}

impl Reconciler<'_> {
    /// Classify every file and blob
    ///
    /// Changes come out workspace-only first, then repository-only, then common.
    pub fn reconcile<'r>(
        &self,
        files: &'r [FileEntry],
        blobs: &'r [TrackedBlob],
    ) -> anyhow::Result<Vec<Change<'r>>> {
        let partition = partition(files, blobs)?;
        tracing::debug!(
            common = partition.common.len(),
            workspace_only = partition.workspace_only.len(),
            repository_only = partition.repository_only.len(),
            "partitioned work tree against HEAD"
        );

        let workspace_only = partition
            .workspace_only
            .into_iter()
            .map(|file| self.classify(None, Some(file)));
        let repository_only = partition
            .repository_only
            .into_iter()
            .map(|blob| self.classify(Some(blob), None));
        let common = partition
            .common
            .into_iter()
            .map(|(file, blob)| self.classify(Some(blob), Some(file)));

        workspace_only.chain(repository_only).chain(common).collect()
    }

    pub fn classify<'r>(
        &self,
        blob: Option<&'r TrackedBlob>,
        file: Option<&'r FileEntry>,
    ) -> anyhow::Result<Change<'r>> {
        let kind = match (blob, file) {
            (_, Some(file)) if self.rules.is_ignored_by_tool(&file.clean_path) => {
                return Change::from_parts(ChangeKind::IgnoredByTool, Some(file), None);
            }
            (_, Some(file)) if self.rules.is_ignored_by_source_control(&file.clean_path) => {
                return Change::from_parts(ChangeKind::IgnoredBySourceControl, Some(file), None);
            }
            (Some(blob), Some(file)) => self.compare(blob, file)?,
            (Some(_), None) => ChangeKind::Deleted,
            (None, Some(_)) => ChangeKind::Added,
            (None, None) => anyhow::bail!("contract violation: nothing to classify"),
        };

        Change::from_parts(kind, file, blob)
    }

    fn compare(&self, blob: &TrackedBlob, file: &FileEntry) -> anyhow::Result<ChangeKind> {
        let path = self.root.join(file.clean_path.to_path_buf());
        let metadata = std::fs::metadata(&path)
            .with_context(|| format!("Failed to stat file: {:?}", path))?;
        if metadata.is_dir() {
            anyhow::bail!("tracked file is a directory on disk: {}", file.clean_path);
        }

        let checksum = self
            .hasher
            .hash_blob(&file.clean_path, blob.checksum.algorithm())?;
        tracing::trace!(path = %file.clean_path, %checksum, recorded = %blob.checksum, "hashed");

        Ok(if checksum == blob.checksum {
            ChangeKind::Unchanged
        } else {
            ChangeKind::Modified
        })
    }
}
