use serde::Serialize;

/// Kind of object named by a tree snapshot record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Blob,
    Tree,
    Commit,
}

impl ObjectKind {
    pub fn as_str(&self) -> &str {
        match self {
            ObjectKind::Blob => "blob",
            ObjectKind::Tree => "tree",
            ObjectKind::Commit => "commit",
        }
    }
}

impl TryFrom<&str> for ObjectKind {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        match value {
            "blob" => Ok(ObjectKind::Blob),
            "tree" => Ok(ObjectKind::Tree),
            "commit" => Ok(ObjectKind::Commit),
            _ => Err(anyhow::anyhow!("Invalid object kind: {:?}", value)),
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_kinds() -> anyhow::Result<()> {
        assert_eq!(ObjectKind::try_from("blob")?, ObjectKind::Blob);
        assert_eq!(ObjectKind::try_from("tree")?, ObjectKind::Tree);
        assert_eq!(ObjectKind::try_from("commit")?, ObjectKind::Commit);
        assert!(ObjectKind::try_from("tag").is_err());

        Ok(())
    }
}
