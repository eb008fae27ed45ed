//! Porcelain v2 status protocol
//!
//! - `status_record`: typed records, one per protocol line
//! - `parser`: NUL framing and per-line parsing
//!
//! The protocol is assumed well-formed; any line that does not match its
//! shape is a fatal error rather than something to skip.

pub mod parser;
pub mod status_record;

pub const XY_REGEX: &str = r"([MARCDU?!.]{2})";
pub const SUBMODULE_REGEX: &str = r"(N[.]{3}|S[C.][M.][U.])";
pub const MODE_REGEX: &str = r"([0-7]+)";
pub const HASH_REGEX: &str = r"([0-9a-fA-F]+)";
pub const SCORE_REGEX: &str = r"([CR]\d+)";
pub const PATH_REGEX: &str = r"([^\x00]+)";
