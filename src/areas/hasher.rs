use crate::artifacts::hashing::algorithm::Algorithm;
use crate::artifacts::hashing::blob_hasher::BlobHasher;
use crate::artifacts::hashing::checksum::Checksum;
use crate::artifacts::path::SEPARATOR;
use crate::artifacts::path::clean_path::CleanPath;
use anyhow::Context;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::Mutex;

#[derive(Debug)]
struct Pipes {
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

/// A long-lived `git hash-object --stdin-paths` process
///
/// Each request writes one path and reads one object id back while holding
/// the lock, so requests from several threads never interleave.
#[derive(Debug)]
pub struct GitHasher {
    child: Child,
    pipes: Mutex<Pipes>,
}

impl GitHasher {
    pub fn spawn(binary: &str, root: &Path) -> anyhow::Result<Self> {
        let mut child = Command::new(binary)
            .args(["hash-object", "--stdin-paths"])
            .current_dir(root)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("Failed to start {} hash-object", binary))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| anyhow::anyhow!("hash-object stdin is not piped"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow::anyhow!("hash-object stdout is not piped"))?;
        tracing::debug!(pid = child.id(), "started git hash-object");

        Ok(Self {
            child,
            pipes: Mutex::new(Pipes {
                stdin,
                stdout: BufReader::new(stdout),
            }),
        })
    }

    /// Object id of the file at `path`, relative to the work tree root
    pub fn hash(&self, path: &str) -> anyhow::Result<Checksum> {
        let request = if SEPARATOR == '\\' {
            path.replace('\\', "/")
        } else {
            path.to_string()
        };

        let mut pipes = self
            .pipes
            .lock()
            .map_err(|_| anyhow::anyhow!("hash-object pipes poisoned"))?;

        writeln!(pipes.stdin, "{}", request)
            .and_then(|_| pipes.stdin.flush())
            .with_context(|| format!("Failed to send path to hash-object: {:?}", request))?;

        let mut response = String::new();
        let read = pipes
            .stdout
            .read_line(&mut response)
            .with_context(|| format!("Failed to read hash-object response for {:?}", request))?;
        if read == 0 {
            anyhow::bail!("hash-object exited before hashing {:?}", request);
        }

        Checksum::try_parse(response.trim().to_string())
    }

    /// Close stdin and wait for the process to exit
    pub fn close(mut self) -> anyhow::Result<()> {
        drop(self.pipes);
        let status = self
            .child
            .wait()
            .context("Failed to wait for git hash-object")?;
        tracing::debug!(%status, "git hash-object exited");

        if !status.success() {
            anyhow::bail!("git hash-object exited with {}", status);
        }

        Ok(())
    }
}

impl BlobHasher for GitHasher {
    fn hash_blob(&self, path: &CleanPath, algorithm: Algorithm) -> anyhow::Result<Checksum> {
        let checksum = self.hash(path.as_ref())?;

        if checksum.algorithm() != algorithm {
            anyhow::bail!(
                "hash-object returned a {} id for {}, expected {}",
                checksum.algorithm(),
                path,
                algorithm
            );
        }

        Ok(checksum)
    }
}
