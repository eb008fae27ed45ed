use crate::artifacts::objects::MODES;
use serde::Serialize;

/// Octal mode of a tracked entry, as printed by git
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum FileMode {
    #[serde(rename = "100644")]
    File,
    #[serde(rename = "100755")]
    Executable,
    #[serde(rename = "120000")]
    Symlink,
    #[serde(rename = "160000")]
    Submodule,
    #[serde(rename = "000000")]
    Deleted,
    #[serde(rename = "40000")]
    Directory,
}

impl FileMode {
    /// Parse a mode that is both known and supported for diffing
    pub fn try_parse(mode: &str) -> anyhow::Result<Self> {
        let mode = Self::try_parse_any(mode)?;

        if !mode.is_supported() {
            anyhow::bail!("unsupported file mode: {}", mode);
        }

        Ok(mode)
    }

    /// Parse any mode git may print, supported or not
    pub fn try_parse_any(mode: &str) -> anyhow::Result<Self> {
        MODES
            .get(mode)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("invalid file mode: {:?}", mode))
    }

    /// Symlinks and directories are never diffed
    pub fn is_supported(&self) -> bool {
        matches!(
            self,
            FileMode::File | FileMode::Executable | FileMode::Deleted | FileMode::Submodule
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            FileMode::File => "100644",
            FileMode::Executable => "100755",
            FileMode::Symlink => "120000",
            FileMode::Submodule => "160000",
            FileMode::Deleted => "000000",
            FileMode::Directory => "40000",
        }
    }
}

impl std::fmt::Display for FileMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("100644", FileMode::File)]
    #[case("100755", FileMode::Executable)]
    #[case("160000", FileMode::Submodule)]
    #[case("000000", FileMode::Deleted)]
    fn supported_modes_parse(#[case] raw: &str, #[case] expected: FileMode) -> anyhow::Result<()> {
        let mode = FileMode::try_parse(raw)?;

        assert_eq!(mode, expected);
        assert_eq!(mode.as_str(), raw);

        Ok(())
    }

    #[rstest]
    #[case("120000")]
    #[case("40000")]
    #[case("100664")]
    #[case("")]
    #[case("0")]
    fn unsupported_or_unknown_modes_fail(#[case] raw: &str) {
        assert!(FileMode::try_parse(raw).is_err());
    }

    #[test]
    fn any_mode_parses_symlinks_and_directories() -> anyhow::Result<()> {
        assert_eq!(FileMode::try_parse_any("120000")?, FileMode::Symlink);
        assert_eq!(FileMode::try_parse_any("40000")?, FileMode::Directory);
        assert!(!FileMode::Symlink.is_supported());

        Ok(())
    }
}
