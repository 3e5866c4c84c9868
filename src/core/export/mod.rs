//! Export orchestration
//!
//! - [`exporter`] - writes tables to CSV and issues download requests
//! - [`summary`] - per-table and per-download outcomes of a run

pub mod exporter;
pub mod summary;

pub use exporter::Exporter;
pub use summary::{DownloadOutcome, ExportSummary, TableExport, TableOutcome, TableStatus};
