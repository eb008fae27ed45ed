use crate::areas::repository::Repository;
use crate::artifacts::changes::changeset::Changeset;
use crate::artifacts::changes::ignore::IgnoreRules;
use crate::artifacts::path::METADATA_DIR;
use crate::artifacts::status::status_record::ignored_paths;

impl Repository {
    /// Compare the work tree with HEAD and print the changes
    ///
    /// Only added, modified and deleted files are shown unless `all` is set.
    pub async fn diff(&self, all: bool, external_hasher: bool) -> anyhow::Result<()> {
        let inputs = self.gather().await?;
        let rules =
            IgnoreRules::new(METADATA_DIR).with_source_control(ignored_paths(&inputs.status));

        let changeset = Changeset::new(self.reconcile(&inputs, &rules, external_hasher)?);
        self.print_changes(&changeset, all)?;

        Ok(())
    }

    pub(crate) fn print_changes(&self, changeset: &Changeset, all: bool) -> anyhow::Result<()> {
        for change in changeset.sorted() {
            if all || change.kind().is_material() {
                writeln!(self.writer(), "{}", change)?;
            }
        }

        Ok(())
    }
}
