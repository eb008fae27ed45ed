use crate::areas::git::GitEnv;
use crate::areas::workspace::Workspace;
use crate::artifacts::changes::change::Change;
use crate::artifacts::changes::file_entry::FileEntry;
use crate::artifacts::changes::ignore::IgnoreRules;
use crate::artifacts::changes::reconciler::Reconciler;
use crate::artifacts::hashing::blob_hasher::LocalHasher;
use crate::artifacts::snapshot::tree_entry::TreeSnapshot;
use crate::artifacts::status::status_record::StatusRecord;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Everything one comparison needs, read from git and the disk
#[derive(Debug)]
pub struct Inputs {
    pub snapshot: TreeSnapshot,
    pub status: Vec<StatusRecord>,
    pub files: Vec<FileEntry>,
}

pub struct Repository {
    git: GitEnv,
    workspace: Workspace,
    writer: RefCell<Box<dyn std::io::Write>>,
}

impl Repository {
    /// Open the repository whose work tree encloses `dir`
    pub async fn open(
        dir: &Path,
        git_binary: &str,
        writer: Box<dyn std::io::Write>,
    ) -> anyhow::Result<Self> {
        let git = GitEnv::find(git_binary, dir).await?;
        let workspace = Workspace::new(git.root().into());

        Ok(Repository {
            git,
            workspace,
            writer: RefCell::new(writer),
        })
    }

    pub fn path(&self) -> &Path {
        self.git.root()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn git(&self) -> &GitEnv {
        &self.git
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Read the HEAD tree and status concurrently, then scan the work tree
    pub async fn gather(&self) -> anyhow::Result<Inputs> {
        let (snapshot, status) = tokio::try_join!(self.git.ls_tree_head(), self.git.status())?;
        let files = FileEntry::from_scan(&self.workspace.scan()?)?;
        tracing::info!(
            blobs = snapshot.blobs.len(),
            submodules = snapshot.submodules.len(),
            status = status.len(),
            files = files.len(),
            "gathered inputs"
        );

        Ok(Inputs {
            snapshot,
            status,
            files,
        })
    }

    /// Classify the gathered files and blobs
    ///
    /// With `external_hasher` the file contents are hashed by a persistent
    /// `git hash-object` process, which is closed even when comparing fails.
    pub fn reconcile<'r>(
        &self,
        inputs: &'r Inputs,
        rules: &IgnoreRules,
        external_hasher: bool,
    ) -> anyhow::Result<Vec<Change<'r>>> {
        if external_hasher {
            let hasher = self.git.spawn_hasher()?;
            let changes = Reconciler::new(self.path(), &hasher, rules)
                .reconcile(&inputs.files, &inputs.snapshot.blobs);
            let closed = hasher.close();

            let changes = changes?;
            closed?;
            Ok(changes)
        } else {
            let hasher = LocalHasher::new(self.path().into());
            Reconciler::new(self.path(), &hasher, rules)
                .reconcile(&inputs.files, &inputs.snapshot.blobs)
        }
    }
}
