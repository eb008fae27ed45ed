//! User input resolved into checked run settings
//!
//! `UserParameters` holds what the user typed, with defaults applied.
//! `Settings` only exists once every check passed.

use crate::artifacts::path::SEPARATOR;
use crate::artifacts::path::clean::{are_unrelated, is_valid_for_storage};
use anyhow::Context;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

pub const DEFAULT_GIT_BINARY: &str = "git";
pub const CHANGESET_NAME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

#[derive(Debug, Clone)]
pub struct UserParameters {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub name: String,
    pub git: String,
    pub copy_unchanged: bool,
    pub external_hasher: bool,
}

impl UserParameters {
    pub fn new(
        source: PathBuf,
        destination: PathBuf,
        name: Option<String>,
        git: Option<String>,
    ) -> Self {
        Self {
            source,
            destination,
            name: name.unwrap_or_else(|| default_name(Local::now())),
            git: git.unwrap_or_else(|| DEFAULT_GIT_BINARY.to_string()),
            copy_unchanged: false,
            external_hasher: false,
        }
    }

    pub fn with_copy_unchanged(mut self, copy_unchanged: bool) -> Self {
        self.copy_unchanged = copy_unchanged;
        self
    }

    pub fn with_external_hasher(mut self, external_hasher: bool) -> Self {
        self.external_hasher = external_hasher;
        self
    }

    /// The source directory, made absolute
    pub fn source_dir(&self) -> anyhow::Result<PathBuf> {
        existing_dir(&self.source, "source")
    }

    /// Check everything against the work tree root git reported for the source
    pub fn resolve(self, root: &Path) -> anyhow::Result<Settings> {
        check_name(&self.name)?;

        let destination = existing_dir(&self.destination, "destination")?;
        let mut listing = std::fs::read_dir(&destination)
            .with_context(|| format!("Failed to list destination: {:?}", destination))?;
        if listing.next().is_some() {
            anyhow::bail!("destination is not empty: {:?}", destination);
        }

        let root_str = utf8(root)?;
        let destination_str = utf8(&destination)?;
        if !are_unrelated(root_str, destination_str)? {
            anyhow::bail!(
                "source root and destination must not contain each other: {:?}, {:?}",
                root,
                destination
            );
        }

        Ok(Settings {
            root: root.into(),
            destination: destination.into_boxed_path(),
            name: self.name,
            git: self.git,
            copy_unchanged: self.copy_unchanged,
            external_hasher: self.external_hasher,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    root: Box<Path>,
    destination: Box<Path>,
    name: String,
    git: String,
    copy_unchanged: bool,
    external_hasher: bool,
}

impl Settings {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn git(&self) -> &str {
        &self.git
    }

    pub fn copy_unchanged(&self) -> bool {
        self.copy_unchanged
    }

    pub fn external_hasher(&self) -> bool {
        self.external_hasher
    }

    pub fn changeset_dir(&self) -> PathBuf {
        self.destination.join(&self.name)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.destination.join(format!("{}.json", self.name))
    }
}

pub fn default_name(now: DateTime<Local>) -> String {
    now.format(CHANGESET_NAME_FORMAT).to_string()
}

pub fn check_name(name: &str) -> anyhow::Result<()> {
    if name.contains(SEPARATOR) || name.contains(char::is_whitespace) {
        anyhow::bail!("changeset name must be a single word: {:?}", name);
    }
    if !is_valid_for_storage(name) || name == "." || name == ".." {
        anyhow::bail!("changeset name is not valid for storage: {:?}", name);
    }

    Ok(())
}

fn existing_dir(path: &Path, role: &str) -> anyhow::Result<PathBuf> {
    let absolute = path
        .canonicalize()
        .with_context(|| format!("{} does not exist: {:?}", role, path))?;

    if !absolute.is_dir() {
        anyhow::bail!("{} is not a directory: {:?}", role, absolute);
    }

    Ok(absolute)
}

fn utf8(path: &Path) -> anyhow::Result<&str> {
    path.to_str()
        .ok_or_else(|| anyhow::anyhow!("path is not valid UTF-8: {:?}", path))
}
