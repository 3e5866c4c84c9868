//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console logs on stderr
//! - Configurable log levels, with `RUST_LOG` taking precedence
//! - Local JSON file logging with rotation
//!
//! Standard output is left to the per-table export lines.
//!
//! # Example
//!
//! ```no_run
//! use tablecast::logging::init_logging;
//! use tablecast::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of an export run
///
/// # Example
///
/// ```no_run
/// use tablecast::log_export_start;
///
/// log_export_start!(5, "./out");
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($table_count:expr, $output_dir:expr) => {
        tracing::info!(
            tables = $table_count,
            output_dir = %$output_dir,
            "Starting export"
        );
    };
}

/// Log one successfully exported table
///
/// # Example
///
/// ```no_run
/// use tablecast::log_table_exported;
///
/// log_table_exported!("coverage_data", 120, 4096);
/// ```
#[macro_export]
macro_rules! log_table_exported {
    ($table:expr, $rows:expr, $bytes:expr) => {
        tracing::info!(
            table = %$table,
            rows = $rows,
            bytes = $bytes,
            "Table exported"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use tablecast::log_error_with_context;
/// use tablecast::domain::TablecastError;
///
/// let error = TablecastError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = %$context,
            "Error occurred"
        );
    };
}

/// Log the completion of an export run
///
/// # Example
///
/// ```no_run
/// use tablecast::log_export_complete;
/// use std::time::Duration;
///
/// log_export_complete!(4, 1, Duration::from_millis(250));
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($exported:expr, $failed:expr, $duration:expr) => {
        tracing::info!(
            exported = $exported,
            failed = $failed,
            duration_ms = $duration.as_millis() as u64,
            "Export loop finished"
        );
    };
}
