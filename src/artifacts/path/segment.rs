use crate::artifacts::path::SEPARATOR;

/// A single token of a path
///
/// Tokenization never drops bytes: a run of separators keeps its exact length,
/// so concatenating every segment reproduces the original string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment<'p> {
    /// One or more consecutive separators
    Separators(&'p str),
    /// A non-empty run of non-separator bytes
    Name(&'p str),
}

impl<'p> Segment<'p> {
    pub fn as_str(&self) -> &'p str {
        match self {
            Segment::Separators(run) | Segment::Name(run) => run,
        }
    }

    pub fn is_separator(&self) -> bool {
        matches!(self, Segment::Separators(_))
    }

    /// Check whether this is a name segment equal to `name`
    pub fn is_name(&self, name: &str) -> bool {
        matches!(self, Segment::Name(value) if *value == name)
    }
}

impl std::fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Split a path into names and separator runs, preserving it exactly
///
/// ```text
/// ""        -> []
/// "aa//aaa" -> ["aa", "//", "aaa"]
/// "/aaa"    -> ["/", "aaa"]
/// "/////"   -> ["/////"]
/// ```
pub fn tokenize(path: &str) -> Vec<Segment<'_>> {
    let bytes = path.as_bytes();
    let separator = SEPARATOR as u8;
    let mut segments = Vec::new();
    let mut start = 0;

    while start < bytes.len() {
        let in_separator_run = bytes[start] == separator;
        let end = bytes[start..]
            .iter()
            .position(|byte| (*byte == separator) != in_separator_run)
            .map_or(bytes.len(), |offset| start + offset);

        // the separator is ASCII, so both bounds are char boundaries
        let run = &path[start..end];
        segments.push(if in_separator_run {
            Segment::Separators(run)
        } else {
            Segment::Name(run)
        });

        start = end;
    }

    segments
}

/// Concatenate segments back into a path string
pub fn join(segments: &[Segment<'_>]) -> String {
    segments.iter().map(Segment::as_str).collect()
}

/// Only the name segments of a path, separators dropped
pub fn names<'p>(segments: &[Segment<'p>]) -> Vec<&'p str> {
    segments
        .iter()
        .filter(|segment| !segment.is_separator())
        .map(Segment::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn raw(path: &str) -> Vec<&str> {
        tokenize(path).iter().map(Segment::as_str).collect()
    }

    #[rstest]
    #[case("", &[])]
    #[case("c:/windows", &["c:", "/", "windows"])]
    #[case(".git", &[".git"])]
    #[case(".git/a", &[".git", "/", "a"])]
    #[case("/", &["/"])]
    #[case("//", &["//"])]
    #[case("../", &["..", "/"])]
    #[case("a", &["a"])]
    #[case("/a", &["/", "a"])]
    #[case("////a", &["////", "a"])]
    #[case("a/", &["a", "/"])]
    #[case("/a/", &["/", "a", "/"])]
    #[case("a//b", &["a", "//", "b"])]
    #[case("./aaaa/blah/", &[".", "/", "aaaa", "/", "blah", "/"])]
    #[case("/////", &["/////"])]
    #[case("a/////a////", &["a", "/////", "a", "////"])]
    #[case("/////a////a", &["/////", "a", "////", "a"])]
    fn tokenize_preserves_separator_runs(#[case] input: &str, #[case] expected: &[&str]) {
        assert_eq!(raw(input), expected);
    }

    #[test]
    fn tokenize_tags_segments_by_kind() {
        assert_eq!(
            tokenize("/a//b"),
            vec![
                Segment::Separators("/"),
                Segment::Name("a"),
                Segment::Separators("//"),
                Segment::Name("b"),
            ]
        );
    }

    #[test]
    fn names_drop_separators() {
        assert_eq!(names(&tokenize("//a/b///c/")), vec!["a", "b", "c"]);
        assert!(names(&tokenize("///")).is_empty());
    }

    proptest! {
        #[test]
        fn tokenize_round_trips(path in r"[a-z./ ]{0,24}") {
            prop_assert_eq!(join(&tokenize(&path)), path);
        }

        #[test]
        fn tokenize_yields_no_empty_or_adjacent_same_kind_segments(path in r"[ab./]{0,24}") {
            let segments = tokenize(&path);

            prop_assert!(segments.iter().all(|segment| !segment.as_str().is_empty()));
            for pair in segments.windows(2) {
                prop_assert_ne!(pair[0].is_separator(), pair[1].is_separator());
            }
        }
    }
}
