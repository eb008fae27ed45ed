use crate::artifacts::path::segment::{Segment, names, tokenize};
use crate::artifacts::path::{SEPARATOR, SEPARATOR_STR, VALID_NAME_REGEX};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static VALID_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(VALID_NAME_REGEX).expect("name pattern is a valid regex"));

/// Canonicalize a path the way the platform's lexical clean does
///
/// Works on the tokenized form: separator runs collapse to one separator,
/// `.` names vanish, and `..` cancels the preceding real name. A `..` at the
/// root of an absolute path is dropped; in a relative path with nothing left
/// to cancel it is kept. An empty result is `"."`.
pub fn clean(path: &str) -> String {
    let segments = tokenize(path);
    let rooted = segments.first().is_some_and(Segment::is_separator);
    let mut kept: Vec<&str> = Vec::with_capacity(segments.len());

    for segment in &segments {
        match *segment {
            Segment::Separators(_) | Segment::Name(".") => {}
            Segment::Name("..") => match kept.last() {
                Some(last) if *last != ".." => {
                    kept.pop();
                }
                _ if rooted => {}
                _ => kept.push(".."),
            },
            Segment::Name(name) => kept.push(name),
        }
    }

    let body = kept.join(SEPARATOR_STR);
    if rooted {
        format!("{SEPARATOR}{body}")
    } else if body.is_empty() {
        ".".to_string()
    } else {
        body
    }
}

/// Check that every name of the cleaned path is safe to recreate on any target filesystem
pub fn is_valid_for_storage(path: &str) -> bool {
    if path.is_empty() {
        return false;
    }

    let cleaned = clean(path);
    names(&tokenize(&cleaned))
        .iter()
        .all(|name| VALID_NAME.is_match(name))
}

/// Fail unless the path passes `is_valid_for_storage`
pub fn ensure_valid_for_storage(path: &str) -> anyhow::Result<()> {
    if !is_valid_for_storage(path) {
        anyhow::bail!("cannot handle this path: {:?}", path);
    }

    Ok(())
}

pub fn is_absolute(path: &str) -> bool {
    Path::new(path).is_absolute()
}

/// A non-empty relative path that stays inside its base once cleaned
pub fn is_local(path: &str) -> bool {
    if path.is_empty() || is_absolute(path) || path.starts_with(SEPARATOR) {
        return false;
    }

    let cleaned = clean(path);
    names(&tokenize(&cleaned)).first() != Some(&"..")
}

/// The names of the cleaned path, separators stripped
///
/// An empty or all-dot relative path yields `["."]`, a bare root yields nothing.
pub fn parts(path: &str) -> Vec<String> {
    let cleaned = clean(path);
    names(&tokenize(&cleaned))
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Whether `parent` is `child` or one of its ancestors; both must be absolute
pub fn is_ancestor_or_equal(parent: &str, child: &str) -> anyhow::Result<bool> {
    if !is_absolute(parent) || !is_absolute(child) {
        anyhow::bail!(
            "contract violation: {:?} and {:?} are not both absolute",
            parent,
            child
        );
    }

    Ok(parts(child).starts_with(&parts(parent)))
}

/// Neither path contains the other; both must be absolute
pub fn are_unrelated(a: &str, b: &str) -> anyhow::Result<bool> {
    Ok(!is_ancestor_or_equal(a, b)? && !is_ancestor_or_equal(b, a)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    // Expected values are the results of the platform clean for '/'-separated input
    #[rstest]
    #[case("", ".")]
    #[case(".", ".")]
    #[case("/", "/")]
    #[case("//", "/")]
    #[case("//a", "/a")]
    #[case("c://a", "c:/a")]
    #[case(".//a", "a")]
    #[case("/////a", "/a")]
    #[case("aaaa", "aaaa")]
    #[case("aaaa//////", "aaaa")]
    #[case("/////////aaaa//////", "/aaaa")]
    #[case(".///.//.//.//aaaa/.//.//./.", "aaaa")]
    #[case("./.", ".")]
    #[case("././", ".")]
    #[case("/././", "/")]
    #[case("a/././", "a")]
    #[case("a/././a", "a/a")]
    #[case("a//a", "a/a")]
    #[case("a//a/..", "a")]
    #[case("../../..", "../../..")]
    #[case("../a/../..", "../..")]
    #[case("../a/../", "..")]
    #[case("./a/../", ".")]
    #[case("./a/../////", ".")]
    #[case("../a//a", "../a/a")]
    #[case("../a//a/..", "../a")]
    #[case("a/b/../..", ".")]
    #[case("/..", "/")]
    #[case("/../a", "/a")]
    fn clean_matches_platform_semantics(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(clean(input), expected);
    }

    #[rstest]
    #[case("", false)]
    #[case(".", true)]
    #[case("/", true)]
    #[case("./a", true)]
    #[case("../a", true)]
    #[case("../aaaa a", false)]
    #[case(" ", false)]
    #[case("./aaaaa/.", true)]
    #[case("src/main.rs", true)]
    #[case("a/b?c", false)]
    #[case("a/b*c", false)]
    #[case("a/\"quoted\"", false)]
    #[case("a/b|c", false)]
    #[case("a\\b", false)]
    #[case("tab\there", false)]
    #[case("weird~name@v1#2$%^&=+{x}[y]:;,<>()", true)]
    fn is_valid_for_storage_uses_allow_list(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_valid_for_storage(input), expected);
    }

    #[test]
    fn ensure_valid_for_storage_names_the_path() {
        let error = ensure_valid_for_storage("bad name").unwrap_err();
        assert!(error.to_string().contains("bad name"));
    }

    #[rstest]
    #[case("a", true)]
    #[case("a/b", true)]
    #[case("./a/../b", true)]
    #[case(".", true)]
    #[case("", false)]
    #[case("/a", false)]
    #[case("..", false)]
    #[case("../a", false)]
    #[case("a/../../b", false)]
    fn is_local_rejects_escaping_paths(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_local(input), expected);
    }

    #[test]
    fn parts_strip_separators_and_dots() {
        assert_eq!(parts("/a"), vec!["a"]);
        assert_eq!(parts("/a//b/c/d"), vec!["a", "b", "c", "d"]);
        assert!(parts("/a/..").is_empty());
        assert_eq!(parts("/a/./b"), vec!["a", "b"]);
        assert_eq!(parts("/a///./"), vec!["a"]);
        assert_eq!(parts("/a/b/c/d////eff123"), vec!["a", "b", "c", "d", "eff123"]);
        assert!(parts("/").is_empty());
        assert_eq!(parts(""), vec!["."]);
        assert_eq!(parts("./././///"), vec!["."]);
    }

    #[test]
    fn ancestor_or_equal_compares_cleaned_segments() -> anyhow::Result<()> {
        assert!(is_ancestor_or_equal("/a", "/a/b")?);
        assert!(is_ancestor_or_equal("/a", "/a")?);
        assert!(is_ancestor_or_equal("/a//b/c/d", "/a/b/c/d")?);
        assert!(!is_ancestor_or_equal("/a", "/b")?);
        assert!(!is_ancestor_or_equal("/a/b", "/a")?);
        assert!(!is_ancestor_or_equal("/ab", "/abc")?);
        assert!(is_ancestor_or_equal(
            "/home/dev/project",
            "/home/dev/project/dest/../dest/."
        )?);
        assert!(!is_ancestor_or_equal(
            "/home/dev/project/dest/../dest/.",
            "/home/dev/project"
        )?);

        Ok(())
    }

    #[test]
    fn unrelated_paths_share_no_ancestry() -> anyhow::Result<()> {
        assert!(are_unrelated("/src/repo", "/dest/out")?);
        assert!(!are_unrelated("/src/repo", "/src/repo/out")?);
        assert!(!are_unrelated("/src/repo/out", "/src/repo")?);

        Ok(())
    }

    #[test]
    fn ancestry_requires_absolute_paths() {
        assert!(is_ancestor_or_equal("a", "/a").is_err());
        assert!(is_ancestor_or_equal("/a", "a").is_err());
        assert!(are_unrelated("a", "b").is_err());
    }

    proptest! {
        #[test]
        fn clean_is_idempotent(path in r"(a|b|\.|\.\.|/){0,12}") {
            let once = clean(&path);
            prop_assert_eq!(clean(&once), once);
        }

        #[test]
        fn clean_never_returns_empty_or_trailing_separator(path in r"(a|\.|\.\.|/){0,12}") {
            let cleaned = clean(&path);

            prop_assert!(!cleaned.is_empty());
            prop_assert!(cleaned == "/" || !cleaned.ends_with('/'));
            prop_assert!(!cleaned.contains("//"));
        }

        #[test]
        fn generated_names_are_valid_for_storage(
            dir in "[a-zA-Z0-9_-]{1,8}",
            file in r"[a-zA-Z0-9_.\-~@#]{1,12}"
        ) {
            let path = format!("{}/{}", dir, file);
            prop_assert!(is_valid_for_storage(&path));
        }
    }
}
