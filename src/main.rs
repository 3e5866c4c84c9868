// Tablecast - Table to CSV Export Tool
// Copyright (c) 2026 Tablecast Contributors
// Licensed under the MIT License

use clap::Parser;
use std::process;
use tablecast::cli::{Cli, Commands};
use tablecast::config::{load_config_or_default, LoggingConfig};
use tablecast::logging::init_logging;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // A broken config file is reported by the command itself; logging falls
    // back to defaults so that report can still be logged.
    let (config_level, logging_config) = match load_config_or_default(cli.config.as_deref()) {
        Ok(config) => (Some(config.application.log_level), config.logging),
        Err(_) => (None, LoggingConfig::default()),
    };
    let log_level = cli
        .log_level
        .clone()
        .or(config_level)
        .unwrap_or_else(|| "info".to_string());

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Tablecast - table to CSV export tool"
    );

    let exit_code = match execute_command(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e:#}");
            5
        }
    };

    // Flush the file logger before exiting
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    let config = cli.config.as_deref();
    match &cli.command {
        Commands::Export(args) => args.execute(config),
        Commands::ValidateConfig(args) => args.execute(config),
        Commands::Init(args) => args.execute(),
    }
}
