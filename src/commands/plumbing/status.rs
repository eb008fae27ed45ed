use crate::areas::repository::Repository;

impl Repository {
    pub async fn status(&self) -> anyhow::Result<()> {
        let records = self.git().status().await?;

        for record in records.iter() {
            writeln!(self.writer(), "{}", record)?;
        }

        Ok(())
    }
}
