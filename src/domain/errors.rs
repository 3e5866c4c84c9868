//! Domain error types
//!
//! This module defines the error hierarchy for Tablecast.
//! Errors are domain-specific; third-party error types are converted to text
//! at the boundary so they never leak into the public API.

use std::path::PathBuf;
use thiserror::Error;

/// Main Tablecast error type
///
/// This is the primary error type used throughout the library.
#[derive(Debug, Error)]
pub enum TablecastError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// CSV serialization errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Delivery-specific errors
///
/// Raised by [`Deliver`](crate::adapters::delivery::Deliver) implementations when
/// a requested file cannot be handed to the user.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Requested file does not exist in the output directory
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Copying the file to the destination failed
    #[error("Failed to copy {file}: {reason}")]
    CopyFailed { file: String, reason: String },

    /// The delivery destination cannot be prepared
    #[error("Delivery target unavailable: {0}")]
    TargetUnavailable(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for TablecastError {
    fn from(err: std::io::Error) -> Self {
        TablecastError::Io(err.to_string())
    }
}

// Conversion from csv::Error
impl From<csv::Error> for TablecastError {
    fn from(err: csv::Error) -> Self {
        TablecastError::Csv(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for TablecastError {
    fn from(err: serde_json::Error) -> Self {
        TablecastError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for TablecastError {
    fn from(err: toml::de::Error) -> Self {
        TablecastError::Configuration(format!("TOML parse error: {err}"))
    }
}
