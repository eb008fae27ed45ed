use crate::artifacts::hashing::checksum::Checksum;
use crate::artifacts::objects::file_mode::FileMode;
use crate::artifacts::path::clean_path::CleanPath;
use crate::artifacts::status::status_record::{
    ChangedRecord, Score, StatusRecord, SubmoduleState, UnmergedRecord, Xy,
};
use crate::artifacts::status::{
    HASH_REGEX, MODE_REGEX, PATH_REGEX, SCORE_REGEX, SUBMODULE_REGEX, XY_REGEX,
};
use anyhow::Context;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static CHANGED: LazyLock<Regex> = LazyLock::new(|| {
    let (xy, sub, mode, hash, path) = (XY_REGEX, SUBMODULE_REGEX, MODE_REGEX, HASH_REGEX, PATH_REGEX);
    Regex::new(&format!(
        "^1 {xy} {sub} {mode} {mode} {mode} {hash} {hash} {path}$"
    ))
    .expect("changed record pattern is a valid regex")
});

static RENAMED: LazyLock<Regex> = LazyLock::new(|| {
    let (xy, sub, mode, hash, path) = (XY_REGEX, SUBMODULE_REGEX, MODE_REGEX, HASH_REGEX, PATH_REGEX);
    Regex::new(&format!(
        "^2 {xy} {sub} {mode} {mode} {mode} {hash} {hash} {SCORE_REGEX} {path}\x00{path}$"
    ))
    .expect("renamed record pattern is a valid regex")
});

static UNMERGED: LazyLock<Regex> = LazyLock::new(|| {
    let (xy, sub, mode, hash, path) = (XY_REGEX, SUBMODULE_REGEX, MODE_REGEX, HASH_REGEX, PATH_REGEX);
    Regex::new(&format!(
        "^u {xy} {sub} {mode} {mode} {mode} {mode} {hash} {hash} {hash} {path}$"
    ))
    .expect("unmerged record pattern is a valid regex")
});

/// Parse the complete `-z` output of a status run
pub fn parse_output(output: &str) -> anyhow::Result<Vec<StatusRecord>> {
    frame(output)?
        .iter()
        .map(|line| parse_line(line))
        .collect()
}

/// Split NUL-terminated output into logical lines
///
/// A rename/copy record spans two NUL-terminated fields, so a `2 ` line is
/// re-joined with the field that follows it. At most one empty field may
/// appear, and only as the final terminator.
pub fn frame(output: &str) -> anyhow::Result<Vec<String>> {
    let mut joined = Vec::new();
    let mut pending: Option<&str> = None;

    for field in output.split('\0') {
        match pending.take() {
            Some(rename) => joined.push(format!("{rename}\0{field}")),
            None if field.starts_with("2 ") => pending = Some(field),
            None => joined.push(field.to_string()),
        }
    }

    if let Some(rename) = pending {
        anyhow::bail!("incomplete rename record in status output: {:?}", rename);
    }

    let blanks: Vec<usize> = joined
        .iter()
        .enumerate()
        .filter(|(_, line)| line.is_empty())
        .map(|(index, _)| index)
        .collect();

    match blanks.as_slice() {
        [] => {}
        [index] if *index + 1 == joined.len() => {
            joined.pop();
        }
        [_] => anyhow::bail!("empty line not at the end of status output"),
        _ => anyhow::bail!("more than one empty line in status output"),
    }

    Ok(joined)
}

/// Parse a single logical status line
pub fn parse_line(line: &str) -> anyhow::Result<StatusRecord> {
    parse_record(line).with_context(|| format!("Error parsing status line: {:?}", line))
}

fn parse_record(line: &str) -> anyhow::Result<StatusRecord> {
    if let Some(text) = line.strip_prefix('#') {
        return Ok(StatusRecord::Comment {
            text: text.to_string(),
        });
    }
    if let Some(path) = line.strip_prefix("! ") {
        return Ok(StatusRecord::Ignored {
            path: CleanPath::try_parse(path)?,
        });
    }
    if let Some(path) = line.strip_prefix("? ") {
        return Ok(StatusRecord::Untracked {
            path: CleanPath::try_parse(path)?,
        });
    }

    if line.starts_with("1 ") {
        let caps = captures(&CHANGED, line)?;
        return Ok(StatusRecord::Changed(changed_record(&caps, &caps[8])?));
    }
    if line.starts_with("2 ") {
        let caps = captures(&RENAMED, line)?;
        return Ok(StatusRecord::RenamedOrCopied {
            orig_path: CleanPath::try_parse(&caps[10])?,
            score: Score::try_parse(&caps[8])?,
            change: changed_record(&caps, &caps[9])?,
        });
    }
    if line.starts_with("u ") {
        let caps = captures(&UNMERGED, line)?;
        return Ok(StatusRecord::Unmerged(UnmergedRecord::new(
            Xy::try_parse(&caps[1])?,
            SubmoduleState::try_parse(&caps[2])?,
            FileMode::try_parse(&caps[3])?,
            FileMode::try_parse(&caps[4])?,
            FileMode::try_parse(&caps[5])?,
            FileMode::try_parse(&caps[6])?,
            Checksum::try_parse(caps[7].to_string())?,
            Checksum::try_parse(caps[8].to_string())?,
            Checksum::try_parse(caps[9].to_string())?,
            CleanPath::try_parse(&caps[10])?,
        )));
    }

    anyhow::bail!("unknown status record")
}

fn captures<'l>(regex: &Regex, line: &'l str) -> anyhow::Result<Captures<'l>> {
    regex
        .captures(line)
        .ok_or_else(|| anyhow::anyhow!("malformed status record"))
}

fn changed_record(caps: &Captures<'_>, path: &str) -> anyhow::Result<ChangedRecord> {
    let submodule = SubmoduleState::try_parse(&caps[2])?;
    if submodule.is_submodule() {
        anyhow::bail!("submodules not supported");
    }

    Ok(ChangedRecord::new(
        Xy::try_parse(&caps[1])?,
        submodule,
        FileMode::try_parse(&caps[3])?,
        FileMode::try_parse(&caps[4])?,
        FileMode::try_parse(&caps[5])?,
        Checksum::try_parse(caps[6].to_string())?,
        Checksum::try_parse(caps[7].to_string())?,
        CleanPath::try_parse(path)?,
    ))
}
