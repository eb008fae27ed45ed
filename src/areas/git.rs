//! The git binary as an external collaborator
//!
//! Every invocation runs with the work tree root as current directory and
//! captures stdout and stderr. A non-zero exit is fatal with stderr attached.

use crate::areas::hasher::GitHasher;
use crate::artifacts::hashing::algorithm::Algorithm;
use crate::artifacts::hashing::checksum::Checksum;
use crate::artifacts::snapshot::LS_TREE_FORMAT;
use crate::artifacts::snapshot::tree_entry::TreeSnapshot;
use crate::artifacts::status::parser::parse_output;
use crate::artifacts::status::status_record::StatusRecord;
use anyhow::Context;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::sync::LazyLock;
use tokio::process::Command;

pub const GIT_VERSION_REGEX: &str = r"^(\d+)[.](\d+)[.](\d+(-rc\d+)?)";

static GIT_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(GIT_VERSION_REGEX).expect("version pattern is a valid regex"));

/// Exit code git uses when run outside any repository
const NOT_A_REPOSITORY_EXIT_CODE: i32 = 128;

#[derive(Debug, Clone)]
pub struct GitEnv {
    binary: String,
    version: String,
    algorithm: Algorithm,
    root: Box<Path>,
    git_dir: Box<Path>,
}

impl GitEnv {
    /// Locate git and the repository enclosing `dir`
    pub async fn find(binary: &str, dir: &Path) -> anyhow::Result<Self> {
        let version = run_in(binary, dir, &["--version"])
            .await
            .with_context(|| format!("Could not find git at {:?}", binary))?;
        let version = parse_version(&stdout_of(binary, &["--version"], version)?)?;
        tracing::info!(%version, "found git");

        let inside = run_in(binary, dir, &["rev-parse", "--is-inside-work-tree"]).await?;
        if inside.status.code() == Some(NOT_A_REPOSITORY_EXIT_CODE)
            && String::from_utf8_lossy(&inside.stderr).contains("not a git repository")
        {
            anyhow::bail!("not a git repository: {:?}", dir);
        }
        match stdout_of(binary, &["rev-parse", "--is-inside-work-tree"], inside)?.trim() {
            "true" => {}
            "false" => anyhow::bail!("not inside a work tree: {:?}", dir),
            other => anyhow::bail!("could not parse git output: {:?}", other),
        }

        let root = Self::absolute_dir(binary, dir, "--show-toplevel").await?;
        let git_dir = Self::absolute_dir(binary, dir, "--absolute-git-dir").await?;

        let object_format_args = ["rev-parse", "--show-object-format"];
        let format = stdout_of(binary, &object_format_args, run_in(binary, dir, &object_format_args).await?)?;
        let algorithm = Algorithm::from_object_format(&format)?;
        tracing::info!(root = ?root, git_dir = ?git_dir, %algorithm, "found repository");

        Ok(Self {
            binary: binary.to_string(),
            version,
            algorithm,
            root,
            git_dir,
        })
    }

    async fn absolute_dir(binary: &str, dir: &Path, flag: &str) -> anyhow::Result<Box<Path>> {
        let args = ["rev-parse", flag];
        let output = stdout_of(binary, &args, run_in(binary, dir, &args).await?)?;
        let path = PathBuf::from(output.trim_end_matches(['\r', '\n']));

        if !path.is_absolute() || !path.is_dir() {
            anyhow::bail!("git {} is not an absolute directory: {:?}", flag, path);
        }

        Ok(path.into_boxed_path())
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// Run git in the work tree root and return its stdout
    async fn run(&self, args: &[&str]) -> anyhow::Result<Vec<u8>> {
        tracing::debug!(?args, "running git");
        let output = run_in(&self.binary, &self.root, args).await?;

        if !output.status.success() {
            anyhow::bail!(
                "git {} failed with {}: {}",
                args.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(output.stdout)
    }

    async fn run_to_string(&self, args: &[&str]) -> anyhow::Result<String> {
        String::from_utf8(self.run(args).await?)
            .with_context(|| format!("git {} printed non-UTF-8 output", args.join(" ")))
    }

    /// Whether the repository has at least one commit
    pub async fn has_head(&self) -> anyhow::Result<bool> {
        let output = run_in(
            &self.binary,
            &self.root,
            &["rev-parse", "--verify", "--quiet", "HEAD"],
        )
        .await?;

        Ok(output.status.success())
    }

    /// Every tracked blob and submodule of HEAD; empty before the first commit
    pub async fn ls_tree_head(&self) -> anyhow::Result<TreeSnapshot> {
        if !self.has_head().await? {
            tracing::warn!("repository has no commits yet, HEAD tree is empty");
            return Ok(TreeSnapshot::default());
        }

        let format = format!("--format={}", LS_TREE_FORMAT);
        let output = self
            .run_to_string(&["ls-tree", "HEAD", "-r", &format, "-z"])
            .await?;

        TreeSnapshot::parse_output(&output)
    }

    pub async fn status(&self) -> anyhow::Result<Vec<StatusRecord>> {
        let output = self
            .run_to_string(&[
                "status",
                "--porcelain=v2",
                "--untracked-files=all",
                "--show-stash",
                "--branch",
                "--ignored",
                "-z",
            ])
            .await?;

        parse_output(&output)
    }

    /// Raw content of a historical blob
    pub async fn cat_file_blob(&self, checksum: &Checksum) -> anyhow::Result<Vec<u8>> {
        self.run(&["cat-file", "blob", checksum.as_ref()])
            .await
            .with_context(|| format!("Failed to read blob {}", checksum))
    }

    /// Start a persistent `git hash-object` process in the work tree root
    pub fn spawn_hasher(&self) -> anyhow::Result<GitHasher> {
        GitHasher::spawn(&self.binary, &self.root)
    }
}

async fn run_in(binary: &str, dir: &Path, args: &[&str]) -> anyhow::Result<Output> {
    Command::new(binary)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .with_context(|| format!("Failed to execute {} {}", binary, args.join(" ")))
}

fn stdout_of(binary: &str, args: &[&str], output: Output) -> anyhow::Result<String> {
    if !output.status.success() {
        anyhow::bail!(
            "{} {} failed with {}: {}",
            binary,
            args.join(" "),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    String::from_utf8(output.stdout)
        .with_context(|| format!("{} {} printed non-UTF-8 output", binary, args.join(" ")))
}

/// Extract the version number from `git --version` output
pub fn parse_version(output: &str) -> anyhow::Result<String> {
    let output = output.trim();
    let version = output
        .strip_prefix("git version ")
        .and_then(|rest| GIT_VERSION.find(rest))
        .ok_or_else(|| anyhow::anyhow!("version response from git not recognized: {:?}", output))?;

    Ok(version.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("git version 2.43.0\n", "2.43.0")]
    #[case("git version 2.50.0-rc1", "2.50.0-rc1")]
    #[case("git version 2.39.5 (Apple Git-154)", "2.39.5")]
    #[case("git version 2.45.2.windows.1", "2.45.2")]
    fn parse_version_accepts_release_strings(#[case] output: &str, #[case] expected: &str) {
        assert_eq!(parse_version(output).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("hg version 6.0")]
    #[case("git version two")]
    #[case("git version 2.43")]
    fn parse_version_rejects_other_output(#[case] output: &str) {
        assert!(parse_version(output).is_err());
    }
}
