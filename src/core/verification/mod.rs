//! Verification of exported artifacts
//!
//! - [`checksum`] - SHA-256 checksums of exported CSV files

pub mod checksum;

pub use checksum::{checksum_bytes, checksum_file, verify_file};
