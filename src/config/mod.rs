//! Configuration management for Tablecast.
//!
//! Tablecast reads an optional TOML file. Every setting has a default, so the
//! tool runs without any configuration at all.
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [export]
//! output_dir = "."
//! downloads = [
//!     "coverage_data.csv",
//!     "incidence_rate.csv",
//!     "reported_cases.csv",
//!     "vaccine_introduction.csv",
//!     "vaccine_schedule.csv",
//! ]
//!
//! [delivery]
//! mode = "copy"
//! target_dir = "${HOME_DOWNLOADS}"
//!
//! [logging]
//! local_enabled = false
//! local_path = "logs"
//! local_rotation = "daily"
//! ```
//!
//! `${VAR_NAME}` placeholders are replaced from the environment, and
//! `TABLECAST_<SECTION>_<KEY>` variables override individual values.

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_or_default};
pub use schema::{
    ApplicationConfig, DeliveryConfig, DeliveryMode, ExportConfig, LoggingConfig,
    TablecastConfig, DEFAULT_DOWNLOADS,
};
