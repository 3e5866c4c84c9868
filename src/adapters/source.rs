//! Dataset collection source
//!
//! Reads the tables to export from a JSON document of the form
//!
//! ```json
//! {
//!   "coverage_data": {
//!     "columns": ["code", {"name": "coverage", "kind": "float"}],
//!     "rows": [["AFG", 71.0], ["ALB", 95]]
//!   }
//! }
//! ```
//!
//! Table order in the document is the export order.

use crate::domain::{Result, TableCollection, TablecastError};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Load a table collection from a JSON file
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not a valid document.
pub fn load_tables(path: impl AsRef<Path>) -> Result<TableCollection> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        TablecastError::Io(format!("Failed to open input {}: {}", path.display(), e))
    })?;

    let tables = read_tables(BufReader::new(file)).map_err(|e| match e {
        TablecastError::Serialization(msg) => TablecastError::Serialization(format!(
            "Invalid table document {}: {}",
            path.display(),
            msg
        )),
        other => other,
    })?;

    tracing::info!(
        input = %path.display(),
        tables = tables.len(),
        "Loaded table collection"
    );

    Ok(tables)
}

/// Read a table collection from any JSON reader
pub fn read_tables<R: Read>(reader: R) -> Result<TableCollection> {
    Ok(serde_json::from_reader(reader)?)
}
