use crate::artifacts::changes::change::{Change, ChangeKind};

/// The classified changes of one run, with a stable presentation order
#[derive(Debug, Clone)]
pub struct Changeset<'r> {
    changes: Vec<Change<'r>>,
}

impl<'r> Changeset<'r> {
    pub fn new(changes: Vec<Change<'r>>) -> Self {
        Self { changes }
    }

    /// Changes in reconciliation order
    pub fn changes(&self) -> &[Change<'r>] {
        &self.changes
    }

    /// Added, modified and deleted first, then unchanged, then the two ignored
    /// kinds; each group sorted by clean path
    pub fn sorted(&self) -> Vec<Change<'r>> {
        let mut sorted = self.changes.clone();
        sorted.sort_by(|a, b| {
            (Self::group(a.kind()), a.clean_path()).cmp(&(Self::group(b.kind()), b.clean_path()))
        });
        sorted
    }

    pub fn count(&self, kind: ChangeKind) -> usize {
        self.changes
            .iter()
            .filter(|change| change.kind() == kind)
            .count()
    }

    fn group(kind: ChangeKind) -> u8 {
        match kind {
            ChangeKind::Added | ChangeKind::Modified | ChangeKind::Deleted => 0,
            ChangeKind::Unchanged => 1,
            ChangeKind::IgnoredBySourceControl => 2,
            ChangeKind::IgnoredByTool => 3,
        }
    }
}
