use crate::artifacts::hashing::algorithm::Algorithm;
use crate::artifacts::hashing::checksum::Checksum;
use crate::artifacts::objects::object_kind::ObjectKind;
use anyhow::Context;
use sha1::{Digest, Sha1};
use sha2::Sha256;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

/// Compute the blob object id of a file
///
/// The file is streamed, never loaded whole. Its size is read once up front
/// for the header; a file that changes while being hashed yields an id that
/// matches nothing, which surfaces as a modification.
pub fn hash_blob(path: &Path, algorithm: Algorithm) -> anyhow::Result<Checksum> {
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let size = file
        .metadata()
        .with_context(|| format!("Failed to stat file: {:?}", path))?
        .len();

    hash_reader(file, size, algorithm).with_context(|| format!("Failed to hash file: {:?}", path))
}

/// Compute the blob object id of in-memory content
pub fn hash_bytes(content: &[u8], algorithm: Algorithm) -> anyhow::Result<Checksum> {
    hash_reader(content, content.len() as u64, algorithm)
}

fn hash_reader(reader: impl Read, size: u64, algorithm: Algorithm) -> anyhow::Result<Checksum> {
    let header = format!("{} {}\0", ObjectKind::Blob, size);

    let hex = match algorithm {
        Algorithm::Sha1 => digest_hex::<Sha1>(&header, reader)?,
        Algorithm::Sha256 => digest_hex::<Sha256>(&header, reader)?,
    };

    Checksum::try_parse(hex)
}

fn digest_hex<D: Digest + Write>(header: &str, mut reader: impl Read) -> anyhow::Result<String> {
    let mut hasher = D::new();
    Digest::update(&mut hasher, header.as_bytes());
    io::copy(&mut reader, &mut hasher)?;

    Ok(hasher
        .finalize()
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect())
}
