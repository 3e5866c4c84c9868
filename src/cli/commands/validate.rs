//! Validate config command implementation

use crate::config::{load_config_or_default, DeliveryMode};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let source = config_path.unwrap_or("<defaults>");
        tracing::info!(config_path = %source, "Validating configuration");

        println!("Validating configuration: {source}");

        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("Configuration is invalid");
                println!("  Error: {e}");
                return Ok(2);
            }
        };

        println!("Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Output Directory: {}", config.export.output_dir);
        println!("  Downloads:");
        for name in &config.export.downloads {
            println!("    - {name}");
        }
        match config.delivery.mode {
            DeliveryMode::Copy => println!("  Delivery: copy to {}", config.delivery.target_dir),
            DeliveryMode::Log => println!("  Delivery: log only"),
        }
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }

        Ok(0)
    }
}
