//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Tablecast using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Tablecast - table to CSV exporter
#[derive(Parser, Debug)]
#[command(name = "tablecast")]
#[command(version, about, long_about = None)]
#[command(author = "Tablecast Contributors")]
pub struct Cli {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(short, long, env = "TABLECAST_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "TABLECAST_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export tables to CSV files and deliver the download list
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
