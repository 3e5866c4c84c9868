//! Domain models and types for Tablecast.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Tabular data** ([`TableCollection`], [`Dataset`], [`Column`], [`Value`])
//! - **Error types** ([`TablecastError`], [`DeliveryError`])
//! - **Result type alias** ([`Result`])
//!
//! ```rust
//! use tablecast::domain::{Column, ColumnKind, Dataset, TableCollection, Value};
//!
//! let coverage = Dataset::new(vec![
//!     Column::new("code", ColumnKind::Text),
//!     Column::new("coverage", ColumnKind::Float),
//! ])
//! .with_row(vec![Value::from("AFG"), Value::from(71.0)]);
//!
//! let tables = TableCollection::new().with_table("coverage_data", coverage);
//! assert_eq!(tables.len(), 1);
//! ```

pub mod errors;
pub mod result;
pub mod table;
pub mod value;

pub use errors::{DeliveryError, TablecastError};
pub use result::Result;
pub use table::{Column, Dataset, TableCollection};
pub use value::{ColumnKind, Value};
