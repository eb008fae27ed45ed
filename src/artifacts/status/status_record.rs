//! Typed records of `git status --porcelain=v2`
//!
//! One record is produced per protocol line:
//!
//! - `# <text>`: header comment (branch and stash metadata)
//! - `1 <XY> <sub> <mH> <mI> <mW> <hH> <hI> <path>`: ordinary change
//! - `2 <XY> <sub> <mH> <mI> <mW> <hH> <hI> <score> <path>\0<origPath>`: rename or copy
//! - `u <XY> <sub> <m1> <m2> <m3> <mW> <h1> <h2> <h3> <path>`: unmerged entry
//! - `? <path>`: untracked file
//! - `! <path>`: ignored file or directory

use crate::artifacts::hashing::checksum::Checksum;
use crate::artifacts::objects::file_mode::FileMode;
use crate::artifacts::path::clean_path::CleanPath;
use bitflags::bitflags;
use derive_new::new;

/// Two-character staged/unstaged state, `.` meaning unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Xy {
    index: char,
    worktree: char,
}

impl Xy {
    pub fn try_parse(value: &str) -> anyhow::Result<Self> {
        let mut chars = value.chars();

        match (chars.next(), chars.next(), chars.next()) {
            (Some(index), Some(worktree), None) => Ok(Self { index, worktree }),
            _ => anyhow::bail!("invalid status code: {:?}", value),
        }
    }

    pub fn index(&self) -> char {
        self.index
    }

    pub fn worktree(&self) -> char {
        self.worktree
    }
}

impl std::fmt::Display for Xy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.index, self.worktree)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SubmoduleFlags: u8 {
        const COMMIT_CHANGED = 0b001;
        const TRACKED_CHANGES = 0b010;
        const UNTRACKED_CHANGES = 0b100;
    }
}

/// The `<sub>` field: `N...` or `S<c><m><u>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmoduleState {
    NotSubmodule,
    Submodule(SubmoduleFlags),
}

impl SubmoduleState {
    pub fn try_parse(value: &str) -> anyhow::Result<Self> {
        if value == "N..." {
            return Ok(SubmoduleState::NotSubmodule);
        }

        let flags = match value.as_bytes() {
            [b'S', c, m, u] => [
                (*c, b'C', SubmoduleFlags::COMMIT_CHANGED),
                (*m, b'M', SubmoduleFlags::TRACKED_CHANGES),
                (*u, b'U', SubmoduleFlags::UNTRACKED_CHANGES),
            ]
            .into_iter()
            .try_fold(SubmoduleFlags::empty(), |flags, (actual, set, flag)| {
                match actual {
                    b'.' => Some(flags),
                    _ if actual == set => Some(flags | flag),
                    _ => None,
                }
            }),
            _ => None,
        };

        flags
            .map(SubmoduleState::Submodule)
            .ok_or_else(|| anyhow::anyhow!("invalid submodule state: {:?}", value))
    }

    pub fn is_submodule(&self) -> bool {
        matches!(self, SubmoduleState::Submodule(_))
    }
}

impl std::fmt::Display for SubmoduleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmoduleState::NotSubmodule => write!(f, "N..."),
            SubmoduleState::Submodule(flags) => {
                let flag = |set: SubmoduleFlags, c: char| if flags.contains(set) { c } else { '.' };
                write!(
                    f,
                    "S{}{}{}",
                    flag(SubmoduleFlags::COMMIT_CHANGED, 'C'),
                    flag(SubmoduleFlags::TRACKED_CHANGES, 'M'),
                    flag(SubmoduleFlags::UNTRACKED_CHANGES, 'U')
                )
            }
        }
    }
}

/// Rename or copy similarity, e.g. `R100` or `C75`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Score {
    Renamed(u8),
    Copied(u8),
}

impl Score {
    pub fn try_parse(value: &str) -> anyhow::Result<Self> {
        let (kind, percent) = value.split_at_checked(1).unwrap_or_default();
        let percent: u8 = percent
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid score: {:?}", value))?;

        match kind {
            "R" => Ok(Score::Renamed(percent)),
            "C" => Ok(Score::Copied(percent)),
            _ => anyhow::bail!("invalid score: {:?}", value),
        }
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Score::Renamed(percent) => write!(f, "R{}", percent),
            Score::Copied(percent) => write!(f, "C{}", percent),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct ChangedRecord {
    pub xy: Xy,
    pub submodule: SubmoduleState,
    pub mode_head: FileMode,
    pub mode_index: FileMode,
    pub mode_worktree: FileMode,
    pub checksum_head: Checksum,
    pub checksum_index: Checksum,
    pub path: CleanPath,
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct UnmergedRecord {
    pub xy: Xy,
    pub submodule: SubmoduleState,
    pub mode_stage1: FileMode,
    pub mode_stage2: FileMode,
    pub mode_stage3: FileMode,
    pub mode_worktree: FileMode,
    pub checksum_stage1: Checksum,
    pub checksum_stage2: Checksum,
    pub checksum_stage3: Checksum,
    pub path: CleanPath,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusRecord {
    Ignored {
        path: CleanPath,
    },
    Untracked {
        path: CleanPath,
    },
    Comment {
        text: String,
    },
    Changed(ChangedRecord),
    RenamedOrCopied {
        orig_path: CleanPath,
        score: Score,
        change: ChangedRecord,
    },
    Unmerged(UnmergedRecord),
}

impl StatusRecord {
    pub fn label(&self) -> &str {
        match self {
            StatusRecord::Ignored { .. } => "ignored",
            StatusRecord::Untracked { .. } => "untracked",
            StatusRecord::Comment { .. } => "comment",
            StatusRecord::Changed(_) => "changed",
            StatusRecord::RenamedOrCopied { .. } => "renamed",
            StatusRecord::Unmerged(_) => "unmerged",
        }
    }

    /// Path the record is about, if any
    pub fn path(&self) -> Option<&CleanPath> {
        match self {
            StatusRecord::Ignored { path } | StatusRecord::Untracked { path } => Some(path),
            StatusRecord::Comment { .. } => None,
            StatusRecord::Changed(change) | StatusRecord::RenamedOrCopied { change, .. } => {
                Some(&change.path)
            }
            StatusRecord::Unmerged(unmerged) => Some(&unmerged.path),
        }
    }
}

impl std::fmt::Display for StatusRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusRecord::Ignored { path } => write!(f, "ignored {}", path),
            StatusRecord::Untracked { path } => write!(f, "untracked {}", path),
            StatusRecord::Comment { text } => write!(f, "comment {}", text.trim_start()),
            StatusRecord::Changed(change) => write!(
                f,
                "changed {} {} {} {} {} {} {}",
                change.xy,
                change.mode_head,
                change.mode_index,
                change.mode_worktree,
                change.checksum_head.to_short(),
                change.checksum_index.to_short(),
                change.path
            ),
            StatusRecord::RenamedOrCopied {
                orig_path,
                score,
                change,
            } => write!(
                f,
                "renamed {} {} {} -> {}",
                change.xy, score, orig_path, change.path
            ),
            StatusRecord::Unmerged(unmerged) => {
                write!(f, "unmerged {} {}", unmerged.xy, unmerged.path)
            }
        }
    }
}

/// Clean paths of every `Ignored` record
pub fn ignored_paths(records: &[StatusRecord]) -> impl Iterator<Item = &CleanPath> {
    records.iter().filter_map(|record| match record {
        StatusRecord::Ignored { path } => Some(path),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn xy_requires_exactly_two_chars() -> anyhow::Result<()> {
        let xy = Xy::try_parse(".M")?;

        assert_eq!(xy.index(), '.');
        assert_eq!(xy.worktree(), 'M');
        assert_eq!(xy.to_string(), ".M");
        assert!(Xy::try_parse("M").is_err());
        assert!(Xy::try_parse("MMM").is_err());

        Ok(())
    }

    #[rstest]
    #[case("N...", SubmoduleState::NotSubmodule)]
    #[case("S...", SubmoduleState::Submodule(SubmoduleFlags::empty()))]
    #[case("SC..", SubmoduleState::Submodule(SubmoduleFlags::COMMIT_CHANGED))]
    #[case(
        "S.MU",
        SubmoduleState::Submodule(SubmoduleFlags::TRACKED_CHANGES | SubmoduleFlags::UNTRACKED_CHANGES)
    )]
    #[case("SCMU", SubmoduleState::Submodule(SubmoduleFlags::all()))]
    fn submodule_state_round_trips(#[case] raw: &str, #[case] expected: SubmoduleState) {
        let state = SubmoduleState::try_parse(raw).unwrap();

        assert_eq!(state, expected);
        assert_eq!(state.to_string(), raw);
    }

    #[rstest]
    #[case("N..")]
    #[case("SMCU")]
    #[case("X...")]
    #[case("")]
    fn submodule_state_rejects_malformed_fields(#[case] raw: &str) {
        assert!(SubmoduleState::try_parse(raw).is_err());
    }

    #[test]
    fn score_parses_kind_and_percent() -> anyhow::Result<()> {
        assert_eq!(Score::try_parse("R100")?, Score::Renamed(100));
        assert_eq!(Score::try_parse("C75")?, Score::Copied(75));
        assert!(Score::try_parse("X10").is_err());
        assert!(Score::try_parse("R").is_err());
        assert!(Score::try_parse("").is_err());

        Ok(())
    }

    #[test]
    fn ignored_paths_keeps_only_ignored_records() -> anyhow::Result<()> {
        let records = vec![
            StatusRecord::Comment {
                text: " branch.head main".to_string(),
            },
            StatusRecord::Ignored {
                path: CleanPath::try_parse("target/")?,
            },
            StatusRecord::Untracked {
                path: CleanPath::try_parse("notes.txt")?,
            },
        ];

        let ignored: Vec<String> = ignored_paths(&records).map(ToString::to_string).collect();
        assert_eq!(ignored, vec!["target"]);

        Ok(())
    }
}
