//! Integration tests for the export run
//!
//! These tests drive the exporter end to end against a temporary output
//! directory, with a recording delivery standing in for the user's machine.

use std::fs;
use std::path::{Path, PathBuf};
use tablecast::adapters::delivery::{Deliver, DirectoryDelivery};
use tablecast::config::DEFAULT_DOWNLOADS;
use tablecast::core::export::{Exporter, TableStatus};
use tablecast::core::verification::checksum_file;
use tablecast::domain::{Column, ColumnKind, Dataset, DeliveryError, TableCollection, Value};
use tempfile::TempDir;

/// Records every request and reports files missing from `source_dir`
struct RecordingDelivery {
    source_dir: PathBuf,
    requests: Vec<String>,
}

impl RecordingDelivery {
    fn new(source_dir: &Path) -> Self {
        Self {
            source_dir: source_dir.to_path_buf(),
            requests: Vec::new(),
        }
    }
}

impl Deliver for RecordingDelivery {
    fn deliver(&mut self, file_name: &str) -> Result<PathBuf, DeliveryError> {
        self.requests.push(file_name.to_string());
        let path = self.source_dir.join(file_name);
        if path.is_file() {
            Ok(path)
        } else {
            Err(DeliveryError::NotFound(path))
        }
    }
}

fn coverage_data() -> Dataset {
    Dataset::new(vec![
        Column::new("code", ColumnKind::Text),
        Column::new("year", ColumnKind::Integer),
        Column::new("antigen", ColumnKind::Text),
        Column::new("coverage", ColumnKind::Float),
    ])
    .with_row(vec!["AFG".into(), Value::Int(2023), "DTPCV3".into(), Value::Float(71.0)])
    .with_row(vec!["ALB".into(), Value::Int(2023), "MCV1".into(), Value::Int(95)])
    .with_row(vec!["CIV".into(), Value::Int(2022), "BCG, birth".into(), Value::Null])
}

fn incidence_rate() -> Dataset {
    Dataset::with_column_names(&["code", "disease", "incidence_rate"])
        .with_row(vec!["AFG".into(), "MEASLES".into(), Value::Float(12.75)])
        .with_row(vec!["BRA".into(), "PERTUSSIS".into(), Value::Float(0.5)])
}

/// Header says two columns, the row has three
fn bad_table() -> Dataset {
    Dataset::with_column_names(&["a", "b"]).with_row(vec![
        Value::Int(1),
        Value::Int(2),
        Value::Int(3),
    ])
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_scenario_bad_table_is_isolated_and_downloads_still_issued() {
    let dir = TempDir::new().unwrap();
    let tables = TableCollection::new()
        .with_table("coverage_data", coverage_data())
        .with_table("bad_table", bad_table());

    let exporter = Exporter::with_default_downloads(dir.path());
    let mut delivery = RecordingDelivery::new(dir.path());
    let mut console: Vec<u8> = Vec::new();

    let summary = exporter.run(&tables, &mut delivery, &mut console).unwrap();

    // coverage_data.csv: header + 3 rows
    let lines = read_lines(&dir.path().join("coverage_data.csv"));
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "code,year,antigen,coverage");

    // One error line mentioning bad_table
    let output = String::from_utf8(console).unwrap();
    let console_lines: Vec<&str> = output.lines().collect();
    assert_eq!(console_lines.len(), 2);
    assert_eq!(console_lines[0], "Exported coverage_data to coverage_data.csv");
    assert!(console_lines[1].starts_with("Error exporting bad_table: "));

    // All five requests, in order, including the one that exists
    assert_eq!(delivery.requests, DEFAULT_DOWNLOADS.to_vec());
    assert!(summary.downloads[0].is_delivered());
    assert!(summary.downloads[1..].iter().all(|d| !d.is_delivered()));

    assert_eq!(summary.exported_count(), 1);
    assert_eq!(summary.failed_count(), 1);
    assert!(!summary.is_successful());
}

#[test]
fn test_every_table_gets_valid_csv() {
    let dir = TempDir::new().unwrap();
    let tables = TableCollection::new()
        .with_table("coverage_data", coverage_data())
        .with_table("incidence_rate", incidence_rate())
        .with_table("vaccine_introduction", Dataset::with_column_names(&["code", "intro"]));

    let exporter = Exporter::with_default_downloads(dir.path());
    let mut delivery = RecordingDelivery::new(dir.path());
    exporter.run(&tables, &mut delivery, &mut std::io::sink()).unwrap();

    for (name, dataset) in tables.iter() {
        let path = dir.path().join(format!("{name}.csv"));
        let mut reader = csv::Reader::from_path(&path).unwrap();

        let headers: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
        assert_eq!(headers, dataset.column_names());

        let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(records.len(), dataset.row_count(), "row count for {name}");
        assert_eq!(read_lines(&path).len(), dataset.row_count() + 1);
    }

    let coverage = fs::read_to_string(dir.path().join("coverage_data.csv")).unwrap();
    assert_eq!(
        coverage,
        "code,year,antigen,coverage\n\
         AFG,2023,DTPCV3,71.0\n\
         ALB,2023,MCV1,95.0\n\
         CIV,2022,\"BCG, birth\",\n"
    );
}

#[test]
fn test_rerun_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    let tables = TableCollection::new()
        .with_table("coverage_data", coverage_data())
        .with_table("incidence_rate", incidence_rate());
    let exporter = Exporter::with_default_downloads(dir.path());

    let first = exporter
        .run(&tables, &mut RecordingDelivery::new(dir.path()), &mut std::io::sink())
        .unwrap();
    let first_bytes = fs::read(dir.path().join("incidence_rate.csv")).unwrap();

    let second = exporter
        .run(&tables, &mut RecordingDelivery::new(dir.path()), &mut std::io::sink())
        .unwrap();
    let second_bytes = fs::read(dir.path().join("incidence_rate.csv")).unwrap();

    assert_eq!(first_bytes, second_bytes);
    for (a, b) in first.tables.iter().zip(&second.tables) {
        match (&a.status, &b.status) {
            (TableStatus::Exported(x), TableStatus::Exported(y)) => {
                assert_eq!(x.checksum, y.checksum);
                assert_eq!(checksum_file(&y.path).unwrap(), y.checksum);
            }
            other => panic!("unexpected statuses: {other:?}"),
        }
    }
}

#[test]
fn test_write_error_does_not_stop_later_tables() {
    let dir = TempDir::new().unwrap();
    // The parent directory of the first table's file does not exist
    let tables = TableCollection::new()
        .with_table("missing_dir/reported_cases", incidence_rate())
        .with_table("reported_cases", incidence_rate());

    let exporter = Exporter::with_default_downloads(dir.path());
    let mut console: Vec<u8> = Vec::new();
    let outcomes = exporter.export_tables(&tables, &mut console).unwrap();

    assert!(!outcomes[0].is_success());
    assert!(outcomes[1].is_success());
    assert!(dir.path().join("reported_cases.csv").is_file());

    let output = String::from_utf8(console).unwrap();
    assert!(output.starts_with("Error exporting missing_dir/reported_cases: I/O error: "));
    assert!(output.ends_with("Exported reported_cases to reported_cases.csv\n"));
}

#[test]
fn test_downloads_issued_for_empty_collection() {
    let dir = TempDir::new().unwrap();
    let exporter = Exporter::with_default_downloads(dir.path());
    let mut delivery = RecordingDelivery::new(dir.path());
    let mut console: Vec<u8> = Vec::new();

    let summary = exporter
        .run(&TableCollection::new(), &mut delivery, &mut console)
        .unwrap();

    assert!(console.is_empty());
    assert_eq!(delivery.requests, DEFAULT_DOWNLOADS.to_vec());
    assert_eq!(summary.failed_downloads().count(), 5);
}

#[test]
fn test_download_list_ignores_collection_keys() {
    let dir = TempDir::new().unwrap();
    let tables = TableCollection::new().with_table("unrelated_table", incidence_rate());
    let exporter = Exporter::new(dir.path(), vec!["vaccine_schedule.csv".to_string()]);
    let mut delivery = RecordingDelivery::new(dir.path());

    exporter.run(&tables, &mut delivery, &mut std::io::sink()).unwrap();

    assert_eq!(delivery.requests, vec!["vaccine_schedule.csv"]);
    assert!(dir.path().join("unrelated_table.csv").is_file());
}

#[test]
fn test_directory_delivery_end_to_end() {
    let out = TempDir::new().unwrap();
    let downloads = TempDir::new().unwrap();
    let tables = TableCollection::new()
        .with_table("coverage_data", coverage_data())
        .with_table("incidence_rate", incidence_rate());

    let exporter = Exporter::with_default_downloads(out.path());
    let mut delivery = DirectoryDelivery::new(out.path(), downloads.path());
    let summary = exporter.run(&tables, &mut delivery, &mut std::io::sink()).unwrap();

    assert_eq!(summary.delivered_count(), 2);
    assert_eq!(
        fs::read(downloads.path().join("coverage_data.csv")).unwrap(),
        fs::read(out.path().join("coverage_data.csv")).unwrap()
    );
    let missing: Vec<&str> = summary
        .failed_downloads()
        .map(|d| d.file_name.as_str())
        .collect();
    assert_eq!(
        missing,
        vec!["reported_cases.csv", "vaccine_introduction.csv", "vaccine_schedule.csv"]
    );
}
