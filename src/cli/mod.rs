//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for GraniteRegulate using clap.
//!
//! # Exit codes
//!
//! - `0`: success, and for `scan` no violations
//! - `1`: `scan` found violations
//! - `2`: configuration error
//! - `3`: `scan` could not read or extract the file
//! - `5`: fatal error

pub mod commands;

use clap::{Parser, Subcommand};

/// GraniteRegulate - GDPR and HIPAA compliance scanner
#[derive(Parser, Debug)]
#[command(name = "granite-regulate")]
#[command(version, about, long_about = None)]
#[command(author = "GraniteRegulate Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        default_value = crate::config::DEFAULT_CONFIG_FILE,
        env = "GRANITE_CONFIG"
    )]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "GRANITE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Serve(commands::serve::ServeArgs),

    /// Scan a local CSV, PDF or audio file
    Scan(commands::scan::ScanArgs),

    /// Render a newline-separated violation list as a PDF report
    Report(commands::report::ReportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
