//! Archive checksums for regression checks.
//!
//! A checksum is the SHA-256 digest of the archive file, base64 encoded with
//! the standard padded alphabet (44 characters).

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io;
use std::path::Path;

/// Checksum of the file at `path`.
pub fn archive_checksum(path: &Path) -> Result<String> {
    let mut file =
        File::open(path).with_context(|| format!("opening {} for checksum", path.display()))?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)
        .with_context(|| format!("reading {} for checksum", path.display()))?;
    Ok(STANDARD.encode(hasher.finalize()))
}

/// Checksum of an in-memory archive.
pub fn checksum_bytes(data: &[u8]) -> String {
    STANDARD.encode(Sha256::digest(data))
}
