use crate::artifacts::changes::file_entry::FileEntry;
use crate::artifacts::path::clean_path::CleanPath;
use crate::artifacts::snapshot::tree_entry::TrackedBlob;
use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChangeKind {
    Added,
    Deleted,
    Unchanged,
    Modified,
    IgnoredBySourceControl,
    IgnoredByTool,
}

impl ChangeKind {
    pub fn label(&self) -> &str {
        match self {
            ChangeKind::Added => "Added",
            ChangeKind::Deleted => "Deleted",
            ChangeKind::Unchanged => "Unchanged",
            ChangeKind::Modified => "Modified",
            ChangeKind::IgnoredBySourceControl => "GitIgnored",
            ChangeKind::IgnoredByTool => "ToolIgnored",
        }
    }

    /// Added, modified and deleted files make up the changeset proper
    pub fn is_material(&self) -> bool {
        matches!(
            self,
            ChangeKind::Added | ChangeKind::Modified | ChangeKind::Deleted
        )
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ChangeKind::Added => self.label().green(),
            ChangeKind::Modified => self.label().yellow(),
            ChangeKind::Deleted => self.label().red(),
            ChangeKind::Unchanged => self.label().normal(),
            ChangeKind::IgnoredBySourceControl | ChangeKind::IgnoredByTool => {
                self.label().dimmed()
            }
        };
        write!(f, "{}", label)
    }
}

/// Classification of one work tree file and/or tracked blob
///
/// Each kind carries exactly the sides it implies, so the pairing cannot
/// drift from the kind once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change<'r> {
    Added(&'r FileEntry),
    Deleted(&'r TrackedBlob),
    Unchanged {
        file: &'r FileEntry,
        blob: &'r TrackedBlob,
    },
    Modified {
        file: &'r FileEntry,
        blob: &'r TrackedBlob,
    },
    IgnoredBySourceControl(&'r FileEntry),
    IgnoredByTool(&'r FileEntry),
}

impl<'r> Change<'r> {
    /// Build a change, failing if the sides present contradict the kind
    pub fn from_parts(
        kind: ChangeKind,
        file: Option<&'r FileEntry>,
        blob: Option<&'r TrackedBlob>,
    ) -> anyhow::Result<Self> {
        match (kind, file, blob) {
            (ChangeKind::Added, Some(file), None) => Ok(Change::Added(file)),
            (ChangeKind::Deleted, None, Some(blob)) => Ok(Change::Deleted(blob)),
            (ChangeKind::Unchanged, Some(file), Some(blob)) => Ok(Change::Unchanged { file, blob }),
            (ChangeKind::Modified, Some(file), Some(blob)) => Ok(Change::Modified { file, blob }),
            (ChangeKind::IgnoredBySourceControl, Some(file), None) => {
                Ok(Change::IgnoredBySourceControl(file))
            }
            (ChangeKind::IgnoredByTool, Some(file), None) => Ok(Change::IgnoredByTool(file)),
            (kind, file, blob) => anyhow::bail!(
                "illegal state: {:?} change with file present: {}, blob present: {}",
                kind,
                file.is_some(),
                blob.is_some()
            ),
        }
    }

    pub fn kind(&self) -> ChangeKind {
        match self {
            Change::Added(_) => ChangeKind::Added,
            Change::Deleted(_) => ChangeKind::Deleted,
            Change::Unchanged { .. } => ChangeKind::Unchanged,
            Change::Modified { .. } => ChangeKind::Modified,
            Change::IgnoredBySourceControl(_) => ChangeKind::IgnoredBySourceControl,
            Change::IgnoredByTool(_) => ChangeKind::IgnoredByTool,
        }
    }

    pub fn file(&self) -> Option<&'r FileEntry> {
        match *self {
            Change::Added(file)
            | Change::Unchanged { file, .. }
            | Change::Modified { file, .. }
            | Change::IgnoredBySourceControl(file)
            | Change::IgnoredByTool(file) => Some(file),
            Change::Deleted(_) => None,
        }
    }

    pub fn blob(&self) -> Option<&'r TrackedBlob> {
        match *self {
            Change::Deleted(blob) | Change::Unchanged { blob, .. } | Change::Modified { blob, .. } => {
                Some(blob)
            }
            _ => None,
        }
    }

    /// The path both sides agree on
    pub fn clean_path(&self) -> &'r CleanPath {
        match *self {
            Change::Deleted(blob) => &blob.clean_path,
            Change::Added(file)
            | Change::Unchanged { file, .. }
            | Change::Modified { file, .. }
            | Change::IgnoredBySourceControl(file)
            | Change::IgnoredByTool(file) => &file.clean_path,
        }
    }
}

impl std::fmt::Display for Change<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind(), self.clean_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::hashing::checksum::Checksum;
    use crate::artifacts::objects::file_mode::FileMode;
    use rstest::rstest;

    fn file() -> FileEntry {
        FileEntry::try_new("a/b.txt").unwrap()
    }

    fn blob() -> TrackedBlob {
        TrackedBlob {
            clean_path: CleanPath::try_parse("a/b.txt").unwrap(),
            raw_path: "a/b.txt".to_string(),
            checksum: Checksum::try_parse("ce013625030ba8dba906f756967f9e9ca394464a".to_string())
                .unwrap(),
            mode: FileMode::File,
        }
    }

    #[rstest]
    #[case(ChangeKind::Added, true, false)]
    #[case(ChangeKind::Deleted, false, true)]
    #[case(ChangeKind::Unchanged, true, true)]
    #[case(ChangeKind::Modified, true, true)]
    #[case(ChangeKind::IgnoredBySourceControl, true, false)]
    #[case(ChangeKind::IgnoredByTool, true, false)]
    fn from_parts_accepts_only_the_sides_each_kind_implies(
        #[case] kind: ChangeKind,
        #[case] has_file: bool,
        #[case] has_blob: bool,
    ) {
        let (file, blob) = (file(), blob());

        for with_file in [false, true] {
            for with_blob in [false, true] {
                let change = Change::from_parts(
                    kind,
                    with_file.then_some(&file),
                    with_blob.then_some(&blob),
                );

                if (with_file, with_blob) == (has_file, has_blob) {
                    let change = change.unwrap();
                    assert_eq!(change.kind(), kind);
                    assert_eq!(change.file().is_some(), has_file);
                    assert_eq!(change.blob().is_some(), has_blob);
                } else {
                    assert!(change.is_err());
                }
            }
        }
    }

    #[test]
    fn display_names_kind_and_path() {
        colored::control::set_override(false);
        let blob = blob();

        assert_eq!(Change::Deleted(&blob).to_string(), "Deleted a/b.txt");
    }

    #[test]
    fn material_kinds_are_added_modified_and_deleted() {
        let material: Vec<ChangeKind> = [
            ChangeKind::Added,
            ChangeKind::Deleted,
            ChangeKind::Unchanged,
            ChangeKind::Modified,
            ChangeKind::IgnoredBySourceControl,
            ChangeKind::IgnoredByTool,
        ]
        .into_iter()
        .filter(ChangeKind::is_material)
        .collect();

        assert_eq!(
            material,
            vec![ChangeKind::Added, ChangeKind::Deleted, ChangeKind::Modified]
        );
    }
}
