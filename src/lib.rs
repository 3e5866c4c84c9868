// Tablecast - Table to CSV Export Tool
// Copyright (c) 2026 Tablecast Contributors
// Licensed under the MIT License

//! # Tablecast - export cleaned tables to CSV
//!
//! Tablecast writes a collection of in-memory tables to one CSV file per
//! table, named after the database table it will be imported into, and then
//! hands a fixed list of files to the user.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Exporter, run summary, checksums
//! - [`adapters`] - Table source and file delivery
//! - [`domain`] - Tables, values, errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tablecast::adapters::delivery::LogOnlyDelivery;
//! use tablecast::core::export::Exporter;
//! use tablecast::domain::{Dataset, TableCollection, Value};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let coverage = Dataset::with_column_names(&["code", "year", "coverage"])
//!     .with_row(vec!["AFG".into(), Value::Int(2023), Value::Float(71.5)]);
//! let tables = TableCollection::new().with_table("coverage_data", coverage);
//!
//! let exporter = Exporter::with_default_downloads(".");
//! let mut delivery = LogOnlyDelivery::new(".");
//! let summary = exporter.run(&tables, &mut delivery, &mut std::io::stdout())?;
//!
//! println!("{} of {} tables exported", summary.exported_count(), summary.total_tables());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Library functions return [`domain::Result`], whose error type is
//! [`domain::TablecastError`]. Per-table export failures are not errors of
//! the run: they are printed, recorded in the summary, and the loop moves on.
//!
//! ## Logging
//!
//! Tablecast logs with `tracing`; see [`logging::init_logging`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
