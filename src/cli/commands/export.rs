//! Export command implementation
//!
//! Loads the table collection, writes one CSV per table and delivers the
//! configured download list.

use crate::adapters::delivery::create_delivery;
use crate::adapters::source::load_tables;
use crate::config::{load_config_or_default, DeliveryMode, TablecastConfig};
use crate::core::export::Exporter;
use crate::log_error_with_context;
use anyhow::Context;
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// JSON document holding the tables to export
    #[arg(short, long, env = "TABLECAST_INPUT")]
    pub input: PathBuf,

    /// Override the directory CSV files are written to
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Copy delivered files into this directory
    #[arg(long, value_name = "DIR")]
    pub deliver_to: Option<String>,

    /// Log download requests instead of copying files
    #[arg(long, conflicts_with = "deliver_to")]
    pub no_deliver: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input.display(), "Starting export command");

        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(e, "Failed to load configuration");
                eprintln!("{e}");
                return Ok(2);
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        std::fs::create_dir_all(&config.export.output_dir).with_context(|| {
            format!("Failed to create output directory {}", config.export.output_dir)
        })?;

        let tables = load_tables(&self.input)?;

        let exporter = Exporter::from_config(&config.export);
        let mut delivery = create_delivery(&config);

        let stdout = std::io::stdout();
        let mut console = stdout.lock();
        let summary = exporter.run(&tables, delivery.as_mut(), &mut console)?;
        console.flush()?;

        for download in &summary.downloads {
            match &download.result {
                Ok(path) => eprintln!("Delivered {} -> {}", download.file_name, path.display()),
                Err(e) => eprintln!("Failed to deliver {}: {}", download.file_name, e),
            }
        }

        if summary.is_successful() {
            Ok(0)
        } else {
            Ok(1)
        }
    }

    fn apply_overrides(&self, config: &mut TablecastConfig) {
        if let Some(dir) = &self.output_dir {
            tracing::info!(output_dir = %dir, "Overriding output directory from CLI");
            config.export.output_dir = dir.clone();
        }

        if let Some(dir) = &self.deliver_to {
            tracing::info!(target_dir = %dir, "Overriding delivery target from CLI");
            config.delivery.mode = DeliveryMode::Copy;
            config.delivery.target_dir = dir.clone();
        }

        if self.no_deliver {
            tracing::info!("Delivery disabled from CLI, requests will only be logged");
            config.delivery.mode = DeliveryMode::Log;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ExportArgs {
        ExportArgs {
            input: PathBuf::from("tables.json"),
            output_dir: None,
            deliver_to: None,
            no_deliver: false,
        }
    }

    #[test]
    fn test_overrides_leave_defaults_untouched() {
        let mut config = TablecastConfig::default();
        args().apply_overrides(&mut config);
        assert_eq!(config, TablecastConfig::default());
    }

    #[test]
    fn test_deliver_to_forces_copy_mode() {
        let mut config = TablecastConfig::default();
        config.delivery.mode = DeliveryMode::Log;

        let args = ExportArgs {
            deliver_to: Some("/tmp/downloads".to_string()),
            output_dir: Some("out".to_string()),
            ..args()
        };
        args.apply_overrides(&mut config);

        assert_eq!(config.delivery.mode, DeliveryMode::Copy);
        assert_eq!(config.delivery.target_dir, "/tmp/downloads");
        assert_eq!(config.export.output_dir, "out");
    }

    #[test]
    fn test_no_deliver_switches_to_log_mode() {
        let mut config = TablecastConfig::default();
        let args = ExportArgs {
            no_deliver: true,
            ..args()
        };
        args.apply_overrides(&mut config);
        assert_eq!(config.delivery.mode, DeliveryMode::Log);
    }
}
