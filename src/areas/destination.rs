use crate::areas::git::GitEnv;
use crate::areas::settings::Settings;
use crate::areas::workspace::Workspace;
use crate::artifacts::changes::change::Change;
use crate::artifacts::changes::changeset::Changeset;
use crate::artifacts::path::clean::is_local;
use crate::artifacts::path::clean_path::CleanPath;
use crate::artifacts::snapshot::tree_entry::TrackedBlob;
use anyhow::Context;
use chrono::{DateTime, Local};
use derive_new::new;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Sidecar description of a written changeset
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub name: String,
    pub created: DateTime<Local>,
    pub source: PathBuf,
    pub deletions: Vec<TrackedBlob>,
}

/// Writes `<destination>/<name>/` and its `<name>.json` manifest
#[derive(new)]
pub struct ChangesetWriter<'s> {
    settings: &'s Settings,
    git: &'s GitEnv,
    workspace: &'s Workspace,
}

impl ChangesetWriter<'_> {
    pub async fn write(&self, changeset: &Changeset<'_>) -> anyhow::Result<Manifest> {
        let dir = self.settings.changeset_dir();
        std::fs::create_dir(&dir)
            .with_context(|| format!("Failed to create changeset directory: {:?}", dir))?;
        tracing::info!(dir = ?dir, "writing changeset");

        let mut deletions = Vec::new();
        let mut copied = 0usize;

        for change in changeset.sorted() {
            match change {
                Change::Added(file) | Change::Modified { file, .. } => {
                    self.copy(&dir, &file.clean_path)?;
                    copied += 1;
                }
                Change::Unchanged { file, .. } if self.settings.copy_unchanged() => {
                    self.copy(&dir, &file.clean_path)?;
                    copied += 1;
                }
                Change::Deleted(blob) => {
                    self.restore(&dir, blob).await?;
                    deletions.push(blob.clone());
                }
                Change::Unchanged { .. }
                | Change::IgnoredBySourceControl(_)
                | Change::IgnoredByTool(_) => {}
            }
        }

        let manifest = Manifest {
            name: self.settings.name().to_string(),
            created: Local::now(),
            source: self.settings.root().to_path_buf(),
            deletions,
        };
        self.write_manifest(&manifest)?;
        tracing::info!(copied, deleted = manifest.deletions.len(), "changeset written");

        Ok(manifest)
    }

    fn copy(&self, dir: &Path, path: &CleanPath) -> anyhow::Result<()> {
        let target = local_target(dir, path)?;
        tracing::debug!(%path, "copying file");

        self.workspace.copy_file(&path.to_path_buf(), &target)?;

        Ok(())
    }

    /// Put the HEAD content of a deleted file back under the changeset directory
    async fn restore(&self, dir: &Path, blob: &TrackedBlob) -> anyhow::Result<()> {
        let target = local_target(dir, &blob.clean_path)?;
        tracing::debug!(path = %blob.clean_path, checksum = %blob.checksum.to_short(), "restoring deleted blob");

        let content = self.git.cat_file_blob(&blob.checksum).await?;
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        std::fs::write(&target, content)
            .with_context(|| format!("Failed to write blob to {:?}", target))?;

        Ok(())
    }

    fn write_manifest(&self, manifest: &Manifest) -> anyhow::Result<()> {
        let path = self.settings.manifest_path();
        let file = std::fs::File::create(&path)
            .with_context(|| format!("Failed to create manifest: {:?}", path))?;

        serde_json::to_writer_pretty(file, manifest)
            .with_context(|| format!("Failed to write manifest: {:?}", path))?;

        Ok(())
    }
}

/// Join a relative path to `dir`, refusing anything that would escape it
pub fn local_target(dir: &Path, path: &CleanPath) -> anyhow::Result<PathBuf> {
    if !is_local(path.as_ref()) {
        anyhow::bail!("refusing to write outside the changeset: {}", path);
    }

    Ok(dir.join(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::hashing::checksum::Checksum;
    use crate::artifacts::objects::file_mode::FileMode;

    #[test]
    fn local_target_joins_relative_paths() -> anyhow::Result<()> {
        let path = CleanPath::try_parse("a/b.txt")?;

        assert_eq!(
            local_target(Path::new("/out/set"), &path)?,
            Path::new("/out/set").join("a").join("b.txt")
        );

        Ok(())
    }

    #[test]
    fn manifest_serializes_deletions_in_camel_case() -> anyhow::Result<()> {
        let manifest = Manifest {
            name: "snap".to_string(),
            created: Local::now(),
            source: PathBuf::from("/work/repo"),
            deletions: vec![TrackedBlob {
                clean_path: CleanPath::try_parse("gone.txt")?,
                raw_path: "gone.txt".to_string(),
                checksum: Checksum::try_parse(
                    "ce013625030ba8dba906f756967f9e9ca394464a".to_string(),
                )?,
                mode: FileMode::File,
            }],
        };

        let json = serde_json::to_value(&manifest)?;

        assert_eq!(json["name"], "snap");
        assert_eq!(json["source"], "/work/repo");
        assert_eq!(json["deletions"][0]["cleanPath"], "gone.txt");
        assert_eq!(json["deletions"][0]["path"], "gone.txt");
        assert_eq!(
            json["deletions"][0]["checksum"],
            "ce013625030ba8dba906f756967f9e9ca394464a"
        );
        assert_eq!(json["deletions"][0]["mode"], "100644");
        assert!(json["created"].is_string());

        Ok(())
    }
}
