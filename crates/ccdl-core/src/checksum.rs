//! SHA-256 verification of downloaded files against catalog checksums.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{CatalogError, Result};

const BUF_SIZE: usize = 64 * 1024;

/// Compute SHA-256 of a file and return the digest as lowercase hex.
/// Reads in chunks to keep memory use bounded.
pub fn sha256_path(path: &Path) -> Result<String> {
    let mut f = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; BUF_SIZE];
    loop {
        let n = f.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Checks `path` against the catalog's `expected` digest (case-insensitive).
///
/// An empty `expected` means the catalog published no checksum; the file is
/// accepted and the computed digest returned.
pub fn verify_sha256(path: &Path, expected: &str) -> Result<String> {
    let actual = sha256_path(path)?;
    if !expected.is_empty() && !actual.eq_ignore_ascii_case(expected.trim()) {
        return Err(CatalogError::ChecksumMismatch {
            file: path.display().to_string(),
            expected: expected.to_string(),
            actual,
        });
    }
    Ok(actual)
}
