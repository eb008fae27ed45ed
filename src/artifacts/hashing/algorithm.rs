use crate::artifacts::hashing::{SHA1_LENGTH, SHA256_LENGTH};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Sha1,
    Sha256,
}

impl Algorithm {
    /// Infer the algorithm of a hex object id from its length alone
    pub fn of(checksum: &str) -> Option<Self> {
        match checksum.len() {
            SHA1_LENGTH => Some(Algorithm::Sha1),
            SHA256_LENGTH => Some(Algorithm::Sha256),
            _ => None,
        }
    }

    /// Map the output of `git rev-parse --show-object-format`
    pub fn from_object_format(format: &str) -> anyhow::Result<Self> {
        match format.trim() {
            "sha1" => Ok(Algorithm::Sha1),
            "sha256" => Ok(Algorithm::Sha256),
            other => anyhow::bail!("unsupported object format: {:?}", other),
        }
    }

    pub fn hex_length(&self) -> usize {
        match self {
            Algorithm::Sha1 => SHA1_LENGTH,
            Algorithm::Sha256 => SHA256_LENGTH,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Algorithm::Sha1 => "sha1",
            Algorithm::Sha256 => "sha256",
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
