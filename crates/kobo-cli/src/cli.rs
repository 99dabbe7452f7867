//! CLI argument definitions for the bulk submission tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "kobo-bulk",
    version,
    about = "Bulk-submit household survey records to KoBoToolbox",
    long_about = "Convert tabular household survey data (one household row plus\n\
                  zero or more member rows) into OpenRosa XML submissions and\n\
                  post them concurrently to a KoBoToolbox collection endpoint."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q to quiet).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build and post one submission per household row.
    Submit(SubmitArgs),

    /// Load the configuration and sources and report what would be
    /// submitted, without building or sending anything.
    Check(CheckArgs),
}

#[derive(Parser)]
pub struct SubmitArgs {
    /// Path to the JSON configuration file.
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Build and serialize every document without posting.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Override the configured dispatch concurrency.
    #[arg(long = "concurrency", value_name = "N")]
    pub concurrency: Option<usize>,

    /// Override the configured submission endpoint.
    #[arg(long = "endpoint", value_name = "URL")]
    pub endpoint: Option<String>,

    /// Generate a fresh instance id per submission instead of reusing
    /// the project UUID.
    #[arg(long = "unique-instance-id")]
    pub unique_instance_id: bool,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Path to the JSON configuration file.
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
