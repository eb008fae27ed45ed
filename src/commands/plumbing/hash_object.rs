use crate::areas::repository::Repository;
use crate::artifacts::hashing::algorithm::Algorithm;
use crate::artifacts::hashing::blob_hasher::{BlobHasher, LocalHasher};
use crate::artifacts::path::clean_path::CleanPath;
use anyhow::Context;
use std::path::Path;

impl Repository {
    pub fn hash_object(
        &self,
        object_path: &Path,
        algorithm: Option<Algorithm>,
        external: bool,
    ) -> anyhow::Result<()> {
        let path = self.relative_clean_path(object_path)?;
        let algorithm = algorithm.unwrap_or(self.git().algorithm());

        let checksum = if external {
            let hasher = self.git().spawn_hasher()?;
            let checksum = hasher.hash_blob(&path, algorithm);
            let closed = hasher.close();

            let checksum = checksum?;
            closed?;
            checksum
        } else {
            LocalHasher::new(self.path().into()).hash_blob(&path, algorithm)?
        };

        writeln!(self.writer(), "{}", checksum)?;

        Ok(())
    }

    /// Clean path of a file inside the work tree, given relative to the current directory
    fn relative_clean_path(&self, object_path: &Path) -> anyhow::Result<CleanPath> {
        let absolute = object_path
            .canonicalize()
            .with_context(|| format!("Failed to resolve file: {:?}", object_path))?;
        let root = self
            .path()
            .canonicalize()
            .with_context(|| format!("Failed to resolve work tree root: {:?}", self.path()))?;

        let relative = absolute
            .strip_prefix(&root)
            .with_context(|| format!("File is outside the work tree: {:?}", absolute))?;
        let relative = relative
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("path is not valid UTF-8: {:?}", relative))?;

        CleanPath::try_parse(relative)
    }
}
