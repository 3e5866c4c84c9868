//! Log-only delivery
//!
//! Records each request without moving anything. The file stays in the output
//! directory, and a missing file is still reported as an error.

use super::traits::Deliver;
use crate::domain::DeliveryError;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct LogOnlyDelivery {
    source_dir: PathBuf,
}

impl LogOnlyDelivery {
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
        }
    }
}

impl Deliver for LogOnlyDelivery {
    fn deliver(&mut self, file_name: &str) -> Result<PathBuf, DeliveryError> {
        let source = self.source_dir.join(file_name);
        if !source.is_file() {
            return Err(DeliveryError::NotFound(source));
        }

        tracing::info!(file = %file_name, path = %source.display(), "Download requested");
        Ok(source)
    }
}
