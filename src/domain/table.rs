//! Tabular datasets and the ordered collection the exporter consumes
//!
//! A [`TableCollection`] maps table names (which match downstream database
//! table identifiers) to [`Dataset`]s. Iteration follows insertion order.

use super::value::{ColumnKind, Value};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A named, typed column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ColumnSpec")]
pub struct Column {
    /// Column name, written to the CSV header
    pub name: String,

    /// Declared kind
    pub kind: ColumnKind,
}

impl Column {
    /// Creates a column with the given kind
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        Self::new(name, ColumnKind::Auto)
    }
}

/// Columns may be written either as a bare name or as `{ name, kind }`
#[derive(Deserialize)]
#[serde(untagged)]
enum ColumnSpec {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        kind: ColumnKind,
    },
}

impl From<ColumnSpec> for Column {
    fn from(spec: ColumnSpec) -> Self {
        match spec {
            ColumnSpec::Name(name) => Column::new(name, ColumnKind::Auto),
            ColumnSpec::Full { name, kind } => Column::new(name, kind),
        }
    }
}

/// An in-memory table: ordered columns and ordered rows
///
/// Rows are not checked against the column count here. A ragged row surfaces
/// as a serialization error when the dataset is exported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub columns: Vec<Column>,

    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Creates an empty dataset with the given columns
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Creates an empty dataset whose columns are all [`ColumnKind::Auto`]
    pub fn with_column_names<S: AsRef<str>>(names: &[S]) -> Self {
        Self::new(names.iter().map(|n| Column::from(n.as_ref())).collect())
    }

    /// Appends a row
    pub fn push_row(&mut self, row: Vec<Value>) {
        self.rows.push(row);
    }

    /// Builder-style variant of [`push_row`](Self::push_row)
    pub fn with_row(mut self, row: Vec<Value>) -> Self {
        self.push_row(row);
        self
    }

    /// Header names in column order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Kind of the column at `index`, or `Auto` past the last column
    pub fn kind_at(&self, index: usize) -> ColumnKind {
        self.columns
            .get(index)
            .map(|c| c.kind)
            .unwrap_or_default()
    }
}

/// Ordered mapping from table name to dataset
///
/// Behaves like an insertion-ordered dictionary: inserting an existing name
/// replaces the dataset but keeps the original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableCollection {
    entries: Vec<(String, Dataset)>,
}

impl TableCollection {
    /// Creates an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a table, returning the previous dataset if any
    pub fn insert(&mut self, name: impl Into<String>, dataset: Dataset) -> Option<Dataset> {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => Some(std::mem::replace(existing, dataset)),
            None => {
                self.entries.push((name, dataset));
                None
            }
        }
    }

    /// Builder-style variant of [`insert`](Self::insert)
    pub fn with_table(mut self, name: impl Into<String>, dataset: Dataset) -> Self {
        self.insert(name, dataset);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Dataset> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, d)| d)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Table names in iteration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Iterates `(name, dataset)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Dataset)> {
        self.entries.iter().map(|(n, d)| (n.as_str(), d))
    }
}

impl<S: Into<String>> FromIterator<(S, Dataset)> for TableCollection {
    fn from_iter<I: IntoIterator<Item = (S, Dataset)>>(iter: I) -> Self {
        let mut collection = TableCollection::new();
        for (name, dataset) in iter {
            collection.insert(name, dataset);
        }
        collection
    }
}

impl<'de> Deserialize<'de> for TableCollection {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CollectionVisitor;

        impl<'de> Visitor<'de> for CollectionVisitor {
            type Value = TableCollection;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of table names to datasets")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut collection = TableCollection::new();
                while let Some((name, dataset)) = map.next_entry::<String, Dataset>()? {
                    collection.insert(name, dataset);
                }
                Ok(collection)
            }
        }

        deserializer.deserialize_map(CollectionVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_column(value: i64) -> Dataset {
        Dataset::with_column_names(&["n"]).with_row(vec![Value::Int(value)])
    }

    #[test]
    fn test_insertion_order_preserved() {
        let tables = TableCollection::new()
            .with_table("vaccine_schedule", one_column(1))
            .with_table("coverage_data", one_column(2))
            .with_table("incidence_rate", one_column(3));

        let names: Vec<&str> = tables.names().collect();
        assert_eq!(names, vec!["vaccine_schedule", "coverage_data", "incidence_rate"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut tables = TableCollection::new()
            .with_table("a", one_column(1))
            .with_table("b", one_column(2));

        let previous = tables.insert("a", one_column(10));

        assert_eq!(previous, Some(one_column(1)));
        assert_eq!(tables.len(), 2);
        assert_eq!(tables.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(tables.get("a"), Some(&one_column(10)));
    }

    #[test]
    fn test_deserialize_keeps_document_order() {
        let json = r#"{
            "zeta": {"columns": ["x"], "rows": [[1]]},
            "alpha": {"columns": [{"name": "rate", "kind": "float"}], "rows": []}
        }"#;

        let tables: TableCollection = serde_json::from_str(json).unwrap();

        assert_eq!(tables.names().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
        let alpha = tables.get("alpha").unwrap();
        assert_eq!(alpha.columns[0], Column::new("rate", ColumnKind::Float));
        assert_eq!(alpha.row_count(), 0);
    }

    #[test]
    fn test_dataset_accessors() {
        let dataset = Dataset::new(vec![
            Column::new("code", ColumnKind::Text),
            Column::new("year", ColumnKind::Integer),
        ])
        .with_row(vec!["AFG".into(), Value::Int(2023)]);

        assert_eq!(dataset.column_names(), vec!["code", "year"]);
        assert_eq!(dataset.column_count(), 2);
        assert_eq!(dataset.row_count(), 1);
        assert_eq!(dataset.kind_at(1), ColumnKind::Integer);
        assert_eq!(dataset.kind_at(5), ColumnKind::Auto);
    }

    #[test]
    fn test_from_iterator() {
        let tables: TableCollection = vec![("a", one_column(1)), ("b", one_column(2))]
            .into_iter()
            .collect();
        assert!(tables.contains("b"));
        assert!(!tables.is_empty());
    }
}
