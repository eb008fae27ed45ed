use crate::artifacts::path::SEPARATOR_STR;
use crate::artifacts::path::clean::{is_ancestor_or_equal, parts};
use crate::artifacts::path::clean_path::CleanPath;
use std::collections::HashSet;

/// Which work tree files are left out of the changeset, and why
///
/// Tool rules always win over source control rules.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    metadata_dir: String,
    /// Destination root relative to the work tree, when it lies inside it
    destination: Option<Vec<String>>,
    source_control: HashSet<String>,
}

impl IgnoreRules {
    pub fn new(metadata_dir: &str) -> Self {
        Self {
            metadata_dir: metadata_dir.to_string(),
            ..Default::default()
        }
    }

    /// Ignore everything under `destination` if it lies inside `root`
    ///
    /// Both paths must be absolute.
    pub fn with_destination(mut self, root: &str, destination: &str) -> anyhow::Result<Self> {
        self.destination = if is_ancestor_or_equal(root, destination)? {
            let root_parts = parts(root);
            Some(parts(destination).split_off(root_parts.len()))
        } else {
            None
        };

        Ok(self)
    }

    /// Paths git reported as ignored; a directory covers everything below it
    pub fn with_source_control<'p>(mut self, paths: impl IntoIterator<Item = &'p CleanPath>) -> Self {
        self.source_control
            .extend(paths.into_iter().map(ToString::to_string));
        self
    }

    pub fn is_ignored_by_tool(&self, path: &CleanPath) -> bool {
        if path.first_segment() == Some(self.metadata_dir.as_str()) {
            return true;
        }

        self.destination
            .as_ref()
            .is_some_and(|destination| path.starts_with_segments(destination))
    }

    pub fn is_ignored_by_source_control(&self, path: &CleanPath) -> bool {
        let segments = path.segments();

        (1..=segments.len()).any(|depth| {
            self.source_control
                .contains(&segments[..depth].join(SEPARATOR_STR))
        })
    }
}
