//! CLI argument parsing for witr

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the diagnosis
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "witr")]
#[command(version)]
#[command(about = "Explain why a process is running", long_about = None)]
pub struct Cli {
    /// Process to diagnose
    #[arg(short = 'p', long = "pid", value_name = "PID")]
    pub pid: i32,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file overriding detector weights, command sets and thresholds
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
