//! Configuration schema types
//!
//! Every section and field has a default, so an empty TOML document (or no
//! configuration file at all) yields a usable configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Filenames requested for download after every export run
pub const DEFAULT_DOWNLOADS: [&str; 5] = [
    "coverage_data.csv",
    "incidence_rate.csv",
    "reported_cases.csv",
    "vaccine_introduction.csv",
    "vaccine_schedule.csv",
];

/// How exported files are handed to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// Copy each requested file into the delivery target directory
    #[default]
    Copy,
    /// Only log the request; files stay in the output directory
    Log,
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryMode::Copy => f.write_str("copy"),
            DeliveryMode::Log => f.write_str("log"),
        }
    }
}

impl std::str::FromStr for DeliveryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "copy" => Ok(DeliveryMode::Copy),
            "log" => Ok(DeliveryMode::Log),
            other => Err(format!(
                "Invalid delivery mode '{other}'. Must be one of: copy, log"
            )),
        }
    }
}

/// Main Tablecast configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TablecastConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Delivery settings
    #[serde(default)]
    pub delivery: DeliveryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TablecastConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.export.validate()?;
        self.delivery.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid application.log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Export configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory the CSV files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Filenames requested for delivery after the export loop
    #[serde(default = "default_downloads")]
    pub downloads: Vec<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            downloads: default_downloads(),
        }
    }
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output_dir.trim().is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }

        for name in &self.downloads {
            if name.trim().is_empty() {
                return Err("export.downloads cannot contain empty filenames".to_string());
            }
            if name.contains('/') || name.contains('\\') {
                return Err(format!(
                    "export.downloads entry '{name}' must be a bare filename"
                ));
            }
        }

        Ok(())
    }
}

/// Delivery configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Delivery mode (copy or log)
    #[serde(default)]
    pub mode: DeliveryMode,

    /// Directory files are copied into when mode = "copy"
    #[serde(default = "default_target_dir")]
    pub target_dir: String,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            mode: DeliveryMode::default(),
            target_dir: default_target_dir(),
        }
    }
}

impl DeliveryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.mode == DeliveryMode::Copy && self.target_dir.trim().is_empty() {
            return Err("delivery.target_dir is required when delivery.mode = 'copy'".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path is required when local_enabled = true".to_string());
        }

        Ok(())
    }
}

fn default_app_name() -> String {
    "tablecast".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_downloads() -> Vec<String> {
    DEFAULT_DOWNLOADS.iter().map(|s| s.to_string()).collect()
}

fn default_target_dir() -> String {
    "downloads".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
