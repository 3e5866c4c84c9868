//! Checksum calculation for exported files
//!
//! Checksums let a caller confirm that re-running an export over identical
//! input produced byte-identical CSV files.

use crate::domain::Result;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Calculate SHA-256 checksum of raw bytes
///
/// Returns a hex-encoded SHA-256 checksum string (64 characters).
///
/// # Examples
///
/// ```
/// use tablecast::core::verification::checksum::checksum_bytes;
///
/// let checksum = checksum_bytes(b"code,year\nAFG,2023\n");
/// assert_eq!(checksum.len(), 64);
/// ```
pub fn checksum_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Calculate SHA-256 checksum of a file's contents
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn checksum_file(path: impl AsRef<Path>) -> Result<String> {
    let mut reader = BufReader::new(File::open(path.as_ref())?);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];

    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Returns true when the file's checksum equals `expected`
pub fn verify_file(path: impl AsRef<Path>, expected: &str) -> Result<bool> {
    Ok(checksum_file(path)? == expected)
}
