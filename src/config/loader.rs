//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{DeliveryMode, TablecastConfig};
use crate::domain::errors::TablecastError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into TablecastConfig
/// 4. Applies environment variable overrides (TABLECAST_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, a referenced environment
/// variable is missing, parsing fails, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use tablecast::config::loader::load_config;
///
/// let config = load_config("tablecast.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<TablecastConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(TablecastError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        TablecastError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: TablecastConfig = toml::from_str(&contents)?;

    apply_env_overrides(&mut config)?;
    validate(&config)?;

    Ok(config)
}

/// Loads the configuration file if one is given, otherwise starts from defaults
///
/// Environment overrides and validation apply in both cases.
pub fn load_config_or_default(path: Option<&str>) -> Result<TablecastConfig> {
    match path {
        Some(path) => load_config(path),
        None => {
            tracing::debug!("No configuration file given, using defaults");
            let mut config = TablecastConfig::default();
            apply_env_overrides(&mut config)?;
            validate(&config)?;
            Ok(config)
        }
    }
}

fn validate(config: &TablecastConfig) -> Result<()> {
    config.validate().map_err(|e| {
        TablecastError::Validation(format!("Configuration validation failed: {e}"))
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| TablecastError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(TablecastError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using TABLECAST_* prefix
///
/// Environment variables follow the pattern: TABLECAST_<SECTION>_<KEY>
fn apply_env_overrides(config: &mut TablecastConfig) -> Result<()> {
    if let Ok(val) = std::env::var("TABLECAST_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("TABLECAST_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val;
    }

    if let Ok(val) = std::env::var("TABLECAST_DELIVERY_MODE") {
        config.delivery.mode = val
            .parse::<DeliveryMode>()
            .map_err(TablecastError::Configuration)?;
    }
    if let Ok(val) = std::env::var("TABLECAST_DELIVERY_TARGET_DIR") {
        config.delivery.target_dir = val;
    }

    if let Ok(val) = std::env::var("TABLECAST_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("TABLECAST_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
