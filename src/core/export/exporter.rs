//! Table exporter
//!
//! Writes every dataset of a [`TableCollection`] to `{name}.csv`, reports one
//! console line per table, then requests delivery of a fixed list of files.
//!
//! A failing table never stops the loop. Delivery requests are issued after
//! the loop whatever its outcome, and are not matched against the tables that
//! were actually exported.

use super::summary::{DownloadOutcome, ExportSummary, TableExport, TableOutcome};
use crate::adapters::delivery::Deliver;
use crate::config::schema::{ExportConfig, DEFAULT_DOWNLOADS};
use crate::core::verification::checksum_bytes;
use crate::domain::{Dataset, Result, TableCollection, TablecastError};
use crate::{log_export_complete, log_export_start, log_table_exported};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::borrow::Cow;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Exports table collections to CSV files
#[derive(Debug, Clone)]
pub struct Exporter {
    output_dir: PathBuf,
    downloads: Vec<String>,
}

impl Exporter {
    /// Create an exporter writing into `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>, downloads: Vec<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            downloads,
        }
    }

    /// Create an exporter with the default download list
    pub fn with_default_downloads(output_dir: impl Into<PathBuf>) -> Self {
        Self::new(
            output_dir,
            DEFAULT_DOWNLOADS.iter().map(|s| s.to_string()).collect(),
        )
    }

    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(&config.output_dir, config.downloads.clone())
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Filenames requested for delivery, in request order
    pub fn downloads(&self) -> &[String] {
        &self.downloads
    }

    /// Filename for a table
    pub fn file_name(table: &str) -> String {
        format!("{table}.csv")
    }

    /// Export every table, writing one console line per table
    ///
    /// Serialization and write failures are recorded in the returned outcomes
    /// and never abort the loop.
    ///
    /// # Errors
    ///
    /// Only fails if a line cannot be written to `console`.
    pub fn export_tables<W: Write>(
        &self,
        tables: &TableCollection,
        console: &mut W,
    ) -> Result<Vec<TableOutcome>> {
        let start = Instant::now();
        log_export_start!(tables.len(), self.output_dir.display());

        let mut outcomes = Vec::with_capacity(tables.len());
        for (name, dataset) in tables.iter() {
            let file_name = Self::file_name(name);
            let outcome = match self.export_table(name, dataset) {
                Ok(export) => {
                    log_table_exported!(name, export.rows, export.bytes);
                    TableOutcome::exported(name, file_name, export)
                }
                Err(e) => {
                    tracing::warn!(table = %name, error = %e, "Table export failed");
                    TableOutcome::failed(name, file_name, e.to_string())
                }
            };

            writeln!(console, "{}", outcome.console_line())?;
            outcomes.push(outcome);
        }

        let exported = outcomes.iter().filter(|o| o.is_success()).count();
        log_export_complete!(exported, outcomes.len() - exported, start.elapsed());

        Ok(outcomes)
    }

    /// Serialize one dataset to `{name}.csv` in the output directory
    ///
    /// The whole file is rendered in memory first, so a dataset that fails to
    /// serialize leaves nothing on disk. An existing file is overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error for rows whose width differs from the header and for
    /// any filesystem failure.
    pub fn export_table(&self, name: &str, dataset: &Dataset) -> Result<TableExport> {
        let contents = render_csv(dataset)?;
        let path = self.output_dir.join(Self::file_name(name));

        fs::write(&path, &contents)
            .map_err(|e| TablecastError::Io(format!("{}: {}", path.display(), e)))?;

        Ok(TableExport {
            path,
            rows: dataset.row_count(),
            bytes: contents.len(),
            checksum: checksum_bytes(&contents),
        })
    }

    /// Issue one delivery request per configured filename, in order
    ///
    /// Every request is made regardless of earlier failures. Each result is
    /// returned unchanged.
    pub fn request_downloads(&self, deliverer: &mut dyn Deliver) -> Vec<DownloadOutcome> {
        self.downloads
            .iter()
            .map(|file_name| {
                tracing::debug!(file = %file_name, "Requesting download");
                DownloadOutcome {
                    file_name: file_name.clone(),
                    result: deliverer.deliver(file_name),
                }
            })
            .collect()
    }

    /// Export all tables, then request all downloads
    ///
    /// # Errors
    ///
    /// Only fails if the console cannot be written to.
    pub fn run<W: Write>(
        &self,
        tables: &TableCollection,
        deliverer: &mut dyn Deliver,
        console: &mut W,
    ) -> Result<ExportSummary> {
        let start = Instant::now();
        let mut summary = ExportSummary::new();

        summary.tables = self.export_tables(tables, console)?;
        summary.downloads = self.request_downloads(deliverer);

        let summary = summary.with_duration(start.elapsed());
        summary.log_summary();
        Ok(summary)
    }
}

/// Render a dataset as CSV: header row, one line per row, no index column
fn render_csv(dataset: &Dataset) -> Result<Vec<u8>> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(dataset.column_names())?;

    for row in &dataset.rows {
        let fields: Vec<Cow<'_, str>> = row
            .iter()
            .enumerate()
            .map(|(i, value)| value.render(dataset.kind_at(i)))
            .collect();
        wtr.write_record(fields.iter().map(|f| f.as_bytes()))?;
    }

    wtr.into_inner()
        .map_err(|e| TablecastError::Csv(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Column, ColumnKind, DeliveryError, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    /// Counts warn-level events
    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[derive(Default)]
    struct RecordingDelivery {
        requests: Vec<String>,
    }

    impl Deliver for RecordingDelivery {
        fn deliver(&mut self, file_name: &str) -> std::result::Result<PathBuf, DeliveryError> {
            self.requests.push(file_name.to_string());
            Ok(PathBuf::from(file_name))
        }
    }

    fn coverage() -> Dataset {
        Dataset::new(vec![
            Column::new("code", ColumnKind::Text),
            Column::new("name", ColumnKind::Text),
            Column::new("coverage", ColumnKind::Float),
        ])
        .with_row(vec!["AFG".into(), "Afghanistan".into(), Value::Int(71)])
        .with_row(vec!["CIV".into(), "Côte d'Ivoire, Rep.".into(), Value::Float(84.5)])
        .with_row(vec!["XXX".into(), "Say \"hi\"".into(), Value::Null])
    }

    #[test]
    fn test_render_csv_quoting_and_formatting() {
        let bytes = render_csv(&coverage()).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(
            text,
            "code,name,coverage\n\
             AFG,Afghanistan,71.0\n\
             CIV,\"Côte d'Ivoire, Rep.\",84.5\n\
             XXX,\"Say \"\"hi\"\"\",\n"
        );
    }

    #[test]
    fn test_render_csv_header_only() {
        let dataset = Dataset::with_column_names(&["year", "cases"]);
        let text = String::from_utf8(render_csv(&dataset).unwrap()).unwrap();
        assert_eq!(text, "year,cases\n");
    }

    #[test]
    fn test_render_csv_ragged_row_fails() {
        let dataset = Dataset::with_column_names(&["a", "b"]).with_row(vec![Value::Int(1)]);
        assert!(matches!(render_csv(&dataset), Err(TablecastError::Csv(_))));
    }

    #[test]
    fn test_export_table_writes_file() {
        let dir = TempDir::new().unwrap();
        let exporter = Exporter::with_default_downloads(dir.path());

        let export = exporter.export_table("coverage_data", &coverage()).unwrap();

        assert_eq!(export.path, dir.path().join("coverage_data.csv"));
        assert_eq!(export.rows, 3);
        let written = fs::read(&export.path).unwrap();
        assert_eq!(written.len(), export.bytes);
        assert_eq!(checksum_bytes(&written), export.checksum);
    }

    #[test]
    fn test_failed_table_leaves_no_file() {
        let dir = TempDir::new().unwrap();
        let exporter = Exporter::with_default_downloads(dir.path());
        let ragged = Dataset::with_column_names(&["a", "b"]).with_row(vec![Value::Int(1)]);

        assert!(exporter.export_table("bad_table", &ragged).is_err());
        assert!(!dir.path().join("bad_table.csv").exists());
    }

    #[test]
    fn test_export_tables_console_lines_in_order() {
        let dir = TempDir::new().unwrap();
        let exporter = Exporter::with_default_downloads(dir.path());
        let tables = TableCollection::new()
            .with_table("coverage_data", coverage())
            .with_table(
                "bad_table",
                Dataset::with_column_names(&["a"]).with_row(vec![Value::Int(1), Value::Int(2)]),
            )
            .with_table("vaccine_schedule", Dataset::with_column_names(&["x"]));

        let mut console: Vec<u8> = Vec::new();
        let outcomes = exporter.export_tables(&tables, &mut console).unwrap();
        let output = String::from_utf8(console).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(outcomes.len(), 3);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Exported coverage_data to coverage_data.csv");
        assert!(lines[1].starts_with("Error exporting bad_table: "));
        assert_eq!(lines[2], "Exported vaccine_schedule to vaccine_schedule.csv");
    }

    #[test]
    fn test_request_downloads_issues_every_name() {
        let dir = TempDir::new().unwrap();
        let exporter = Exporter::with_default_downloads(dir.path());
        let mut delivery = RecordingDelivery::default();

        let outcomes = exporter.request_downloads(&mut delivery);

        assert_eq!(outcomes.len(), 5);
        assert_eq!(delivery.requests, DEFAULT_DOWNLOADS.to_vec());
    }

    #[test]
    fn test_from_config() {
        let config = ExportConfig {
            output_dir: "out".to_string(),
            downloads: vec!["only.csv".to_string()],
        };
        let exporter = Exporter::from_config(&config);

        assert_eq!(exporter.output_dir(), Path::new("out"));
        assert_eq!(exporter.downloads(), ["only.csv".to_string()]);
    }

    #[test]
    fn test_failed_table_warned_once_per_run() {
        let dir = TempDir::new().unwrap();
        let exporter = Exporter::new(dir.path(), vec!["coverage_data.csv".to_string()]);
        let tables = TableCollection::new()
            .with_table("coverage_data", coverage())
            .with_table(
                "bad_table",
                Dataset::with_column_names(&["a"]).with_row(vec![Value::Int(1), Value::Int(2)]),
            );

        let warnings = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(WarnCounter(warnings.clone()));

        let summary = tracing::subscriber::with_default(subscriber, || {
            exporter
                .run(&tables, &mut RecordingDelivery::default(), &mut std::io::sink())
                .unwrap()
        });

        assert_eq!(summary.failed_count(), 1);
        assert_eq!(warnings.load(Ordering::SeqCst), 1);
    }
}
