//! Hex object id tagged by its digest algorithm
//!
//! The algorithm is never stored; it is implied by the id length.
//! Ids are compared as opaque strings, so ids of different algorithms
//! are simply unequal.

use crate::artifacts::hashing::algorithm::Algorithm;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Checksum(String);

impl Checksum {
    /// Parse and validate a hex object id
    ///
    /// # Arguments
    ///
    /// * `id` - 40 (SHA-1) or 64 (SHA-256) hexadecimal characters
    ///
    /// # Returns
    ///
    /// Validated checksum or error if the length or characters are invalid
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if Algorithm::of(&id).is_none() {
            anyhow::bail!("invalid checksum length {}: {:?}", id.len(), id);
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            anyhow::bail!("invalid checksum characters: {:?}", id);
        }

        Ok(Self(id))
    }

    pub fn algorithm(&self) -> Algorithm {
        match Algorithm::of(&self.0) {
            Some(algorithm) => algorithm,
            None => unreachable!("checksum length is validated on construction"),
        }
    }

    /// Abbreviated form used in human-facing output
    pub fn to_short(&self) -> &str {
        &self.0[..7]
    }
}

impl AsRef<str> for Checksum {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Checksum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
