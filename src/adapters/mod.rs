//! External system integrations for Tablecast.
//!
//! - [`source`] - reads the table collection to export
//! - [`delivery`] - hands exported files to the user
//!
//! Adapters isolate filesystem and platform details behind small interfaces so
//! the exporter can be exercised with in-memory fakes.

pub mod delivery;
pub mod source;
