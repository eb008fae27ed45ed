//! Content-addressed object ids
//!
//! Blob ids are computed exactly the way git does: `blob <size>\0` followed
//! by the file content, fed through the repository's digest.
//!
//! - `algorithm`: supported digests, inferred from the id length
//! - `checksum`: validated hex object id
//! - `digest`: in-process blob hashing
//! - `blob_hasher`: the hashing seam used by the reconciler

pub mod algorithm;
pub mod blob_hasher;
pub mod checksum;
pub mod digest;

/// Length of a SHA-1 object id in hexadecimal format
pub const SHA1_LENGTH: usize = 40;

/// Length of a SHA-256 object id in hexadecimal format
pub const SHA256_LENGTH: usize = 64;
