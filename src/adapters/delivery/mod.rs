//! File delivery to the user
//!
//! - [`traits`] - the [`Deliver`] capability
//! - [`directory`] - copies files into a target directory
//! - [`log_only`] - logs requests without moving files

pub mod directory;
pub mod log_only;
pub mod traits;

pub use directory::DirectoryDelivery;
pub use log_only::LogOnlyDelivery;
pub use traits::Deliver;

use crate::config::schema::{DeliveryMode, TablecastConfig};

/// Create a delivery implementation based on the configuration
///
/// Files are looked up in `export.output_dir`.
pub fn create_delivery(config: &TablecastConfig) -> Box<dyn Deliver> {
    let source_dir = &config.export.output_dir;
    match config.delivery.mode {
        DeliveryMode::Copy => {
            tracing::info!(target_dir = %config.delivery.target_dir, "Using directory delivery");
            Box::new(DirectoryDelivery::new(
                source_dir,
                &config.delivery.target_dir,
            ))
        }
        DeliveryMode::Log => {
            tracing::info!("Using log-only delivery");
            Box::new(LogOnlyDelivery::new(source_dir))
        }
    }
}
