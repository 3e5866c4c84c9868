//! Core business logic for Tablecast.
//!
//! # Modules
//!
//! - [`export`] - The exporter and its run summary
//! - [`verification`] - Checksums of exported files
//!
//! # Export Workflow
//!
//! 1. **Export**: write each table of the collection to `{name}.csv`, printing
//!    one line per table and carrying on past failures
//! 2. **Deliver**: request each configured download, in order, whatever the
//!    export outcomes were
//! 3. **Report**: return an [`ExportSummary`](export::ExportSummary)
//!
//! # Example
//!
//! ```rust,no_run
//! use tablecast::adapters::delivery::DirectoryDelivery;
//! use tablecast::adapters::source::load_tables;
//! use tablecast::core::export::Exporter;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tables = load_tables("cleaned_tables.json")?;
//! let exporter = Exporter::with_default_downloads(".");
//! let mut delivery = DirectoryDelivery::new(".", "downloads");
//!
//! let summary = exporter.run(&tables, &mut delivery, &mut std::io::stdout())?;
//! println!("Exported {}/{}", summary.exported_count(), summary.total_tables());
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod verification;
