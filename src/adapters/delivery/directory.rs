//! Directory-based delivery
//!
//! Copies requested files from the export output directory into a target
//! directory, typically the user's downloads folder.

use super::traits::Deliver;
use crate::domain::DeliveryError;
use std::fs;
use std::path::{Path, PathBuf};

/// Delivers files by copying them into `target_dir`
#[derive(Debug, Clone)]
pub struct DirectoryDelivery {
    source_dir: PathBuf,
    target_dir: PathBuf,
}

impl DirectoryDelivery {
    /// Create a new directory delivery
    ///
    /// The target directory is created lazily on the first delivery.
    pub fn new(source_dir: impl Into<PathBuf>, target_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            target_dir: target_dir.into(),
        }
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }
}

impl Deliver for DirectoryDelivery {
    fn deliver(&mut self, file_name: &str) -> Result<PathBuf, DeliveryError> {
        let source = self.source_dir.join(file_name);
        if !source.is_file() {
            return Err(DeliveryError::NotFound(source));
        }

        fs::create_dir_all(&self.target_dir).map_err(|e| {
            DeliveryError::TargetUnavailable(format!("{}: {}", self.target_dir.display(), e))
        })?;

        let destination = self.target_dir.join(file_name);
        let bytes = fs::copy(&source, &destination).map_err(|e| DeliveryError::CopyFailed {
            file: file_name.to_string(),
            reason: e.to_string(),
        })?;

        tracing::info!(
            file = %file_name,
            destination = %destination.display(),
            bytes,
            "File delivered"
        );

        Ok(destination)
    }
}
