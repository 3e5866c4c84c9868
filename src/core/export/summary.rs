//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use crate::domain::DeliveryError;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::time::Duration;

/// Details of a successfully written CSV file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableExport {
    /// Path of the written file
    pub path: PathBuf,

    /// Number of data rows (excluding the header)
    pub rows: usize,

    /// Size of the file in bytes
    pub bytes: usize,

    /// Hex SHA-256 of the file contents
    pub checksum: String,
}

/// Result of exporting a single table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableStatus {
    Exported(TableExport),
    Failed { error: String },
}

/// Outcome of one entry of the table collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOutcome {
    /// Table name as given in the collection
    pub name: String,

    /// Target filename (`{name}.csv`)
    pub file_name: String,

    pub status: TableStatus,
}

impl TableOutcome {
    /// Create a success outcome
    pub fn exported(name: impl Into<String>, file_name: impl Into<String>, export: TableExport) -> Self {
        Self {
            name: name.into(),
            file_name: file_name.into(),
            status: TableStatus::Exported(export),
        }
    }

    /// Create a failure outcome
    pub fn failed(name: impl Into<String>, file_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_name: file_name.into(),
            status: TableStatus::Failed {
                error: error.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, TableStatus::Exported(_))
    }

    /// The line printed to the console for this table
    ///
    /// ```
    /// use tablecast::core::export::TableOutcome;
    ///
    /// let outcome = TableOutcome::failed("bad_table", "bad_table.csv", "disk full");
    /// assert_eq!(outcome.console_line(), "Error exporting bad_table: disk full");
    /// ```
    pub fn console_line(&self) -> String {
        match &self.status {
            TableStatus::Exported(_) => format!("Exported {} to {}", self.name, self.file_name),
            TableStatus::Failed { error } => format!("Error exporting {}: {}", self.name, error),
        }
    }
}

/// Outcome of one download request
///
/// The delivery result is kept exactly as the [`Deliver`](crate::adapters::delivery::Deliver)
/// implementation returned it.
#[derive(Debug)]
pub struct DownloadOutcome {
    pub file_name: String,
    pub result: Result<PathBuf, DeliveryError>,
}

impl DownloadOutcome {
    pub fn is_delivered(&self) -> bool {
        self.result.is_ok()
    }
}

/// Summary of an export run
#[derive(Debug)]
pub struct ExportSummary {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Duration of the run
    pub duration: Duration,

    /// Per-table outcomes in collection order
    pub tables: Vec<TableOutcome>,

    /// Per-request download outcomes in request order
    pub downloads: Vec<DownloadOutcome>,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            duration: Duration::from_secs(0),
            tables: Vec::new(),
            downloads: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn total_tables(&self) -> usize {
        self.tables.len()
    }

    pub fn exported_count(&self) -> usize {
        self.tables.iter().filter(|t| t.is_success()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.tables.len() - self.exported_count()
    }

    pub fn delivered_count(&self) -> usize {
        self.downloads.iter().filter(|d| d.is_delivered()).count()
    }

    /// Download requests whose delivery failed
    pub fn failed_downloads(&self) -> impl Iterator<Item = &DownloadOutcome> {
        self.downloads.iter().filter(|d| !d.is_delivered())
    }

    /// Check if every table exported and every file was delivered
    pub fn is_successful(&self) -> bool {
        self.failed_count() == 0 && self.failed_downloads().next().is_none()
    }

    /// Get table success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.tables.is_empty() {
            return 100.0;
        }
        (self.exported_count() as f64 / self.tables.len() as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            started_at = %self.started_at.to_rfc3339(),
            total_tables = self.total_tables(),
            exported = self.exported_count(),
            failed = self.failed_count(),
            downloads_requested = self.downloads.len(),
            downloads_delivered = self.delivered_count(),
            duration_ms = self.duration.as_millis() as u64,
            success_rate = format!("{:.2}%", self.success_rate()),
            "Export run completed"
        );

        for download in self.failed_downloads() {
            if let Err(e) = &download.result {
                tracing::warn!(file = %download.file_name, error = %e, "Delivery failed");
            }
        }
    }
}

impl Default for ExportSummary {
    fn default() -> Self {
        Self::new()
    }
}
