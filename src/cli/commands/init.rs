//! Init command implementation
//!
//! Writes a configuration file holding every setting at its default value.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "tablecast.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("Configuration file already exists: {}", self.output);
            println!("  Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::default_config()) {
            Ok(()) => {
                println!("Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: tablecast --config {} validate-config", self.output);
                println!("  3. Run export: tablecast --config {} export --input tables.json", self.output);
                Ok(0)
            }
            Err(e) => {
                println!("Failed to write configuration file");
                println!("  Error: {e}");
                Ok(5)
            }
        }
    }

    fn default_config() -> &'static str {
        r#"# Tablecast Configuration File

[application]
log_level = "info"

[export]
# CSV files are written here as <table name>.csv
output_dir = "."

# Requested for delivery after every run, whether or not they were exported
downloads = [
    "coverage_data.csv",
    "incidence_rate.csv",
    "reported_cases.csv",
    "vaccine_introduction.csv",
    "vaccine_schedule.csv",
]

[delivery]
mode = "copy"  # copy | log
target_dir = "downloads"

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"  # daily | hourly | never
"#
    }
}
