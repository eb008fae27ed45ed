use crate::areas::repository::Repository;

impl Repository {
    /// Print every blob and submodule of HEAD, recursively
    pub async fn ls_tree(&self) -> anyhow::Result<()> {
        let snapshot = self.git().ls_tree_head().await?;

        for entry in snapshot.entries() {
            writeln!(self.writer(), "{}", entry)?;
        }

        Ok(())
    }
}
