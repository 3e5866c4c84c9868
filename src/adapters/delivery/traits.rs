//! Delivery abstraction
//!
//! Handing a finished file to the user is platform-specific. The exporter only
//! knows this trait, which keeps it testable without any hosting platform.

use crate::domain::DeliveryError;
use std::path::PathBuf;

/// Capability that transfers a file from the output directory to the user
pub trait Deliver {
    /// Deliver the file with the given bare filename
    ///
    /// Returns the path the file was delivered to.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be transferred.
    /// Callers do not retry.
    fn deliver(&mut self, file_name: &str) -> Result<PathBuf, DeliveryError>;
}

impl<D: Deliver + ?Sized> Deliver for Box<D> {
    fn deliver(&mut self, file_name: &str) -> Result<PathBuf, DeliveryError> {
        (**self).deliver(file_name)
    }
}
