use crate::areas::destination::ChangesetWriter;
use crate::areas::repository::Repository;
use crate::areas::settings::Settings;
use crate::artifacts::changes::change::ChangeKind;
use crate::artifacts::changes::changeset::Changeset;
use crate::artifacts::changes::ignore::IgnoreRules;
use crate::artifacts::path::METADATA_DIR;
use crate::artifacts::status::status_record::ignored_paths;
use colored::Colorize;

impl Repository {
    /// Compare the work tree with HEAD and write the changeset to the destination
    pub async fn save(&self, settings: &Settings) -> anyhow::Result<()> {
        let inputs = self.gather().await?;

        let root = utf8(self.path())?;
        let destination = utf8(settings.destination())?;
        let rules = IgnoreRules::new(METADATA_DIR)
            .with_destination(root, destination)?
            .with_source_control(ignored_paths(&inputs.status));

        let changeset =
            Changeset::new(self.reconcile(&inputs, &rules, settings.external_hasher())?);
        self.print_changes(&changeset, false)?;

        let manifest = ChangesetWriter::new(settings, self.git(), self.workspace())
            .write(&changeset)
            .await?;

        writeln!(
            self.writer(),
            "{} {} ({} added, {} modified, {} deleted)",
            "Saved".green(),
            settings.changeset_dir().display(),
            changeset.count(ChangeKind::Added),
            changeset.count(ChangeKind::Modified),
            manifest.deletions.len()
        )?;

        Ok(())
    }
}

fn utf8(path: &std::path::Path) -> anyhow::Result<&str> {
    path.to_str()
        .ok_or_else(|| anyhow::anyhow!("path is not valid UTF-8: {:?}", path))
}
