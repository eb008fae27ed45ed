use crate::artifacts::hashing::algorithm::Algorithm;
use crate::artifacts::hashing::checksum::Checksum;
use crate::artifacts::hashing::digest::hash_blob;
use crate::artifacts::path::clean_path::CleanPath;
use derive_new::new;
use std::path::Path;

/// Source of blob object ids for files of the work tree
///
/// Implementations must be safe to share between threads; every call is
/// independent of the others.
pub trait BlobHasher: Send + Sync {
    /// Hash the file at `path`, relative to the work tree root
    fn hash_blob(&self, path: &CleanPath, algorithm: Algorithm) -> anyhow::Result<Checksum>;
}

/// Hashes files in-process with the local digest implementation
#[derive(Debug, new)]
pub struct LocalHasher {
    root: Box<Path>,
}

impl LocalHasher {
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl BlobHasher for LocalHasher {
    fn hash_blob(&self, path: &CleanPath, algorithm: Algorithm) -> anyhow::Result<Checksum> {
        hash_blob(&self.root.join(path.to_path_buf()), algorithm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;

    #[test]
    fn local_hasher_resolves_paths_against_its_root() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        dir.child("a").child("b.txt").write_str("hello\n")?;

        let hasher = LocalHasher::new(dir.path().into());
        let checksum = hasher.hash_blob(&CleanPath::try_parse("a/b.txt")?, Algorithm::Sha1)?;

        assert_eq!(checksum.to_string(), "ce013625030ba8dba906f756967f9e9ca394464a");

        Ok(())
    }
}
