//! CLI argument definitions for the feed generator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "feedgen",
    version,
    about = "Marketplace feed generator - Convert product sheets to an XML catalog",
    long_about = "Convert spreadsheet product exports into a marketplace XML catalog.\n\n\
                  Reads per-sheet CSV exports, maps positional rows to offers, and\n\
                  writes a single UTF-8 feed document with entity-safe text."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

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
    /// Generate the feed from a directory of sheet exports.
    Generate(GenerateArgs),

    /// Print the positional column layout expected of product sheets.
    Columns,
}

#[derive(Parser)]
pub struct GenerateArgs {
    /// Directory containing one CSV export per sheet.
    #[arg(value_name = "SOURCE_DIR")]
    pub source_dir: PathBuf,

    /// Run configuration file (default: <SOURCE_DIR>/feed.json).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output feed path (default: <SOURCE_DIR>/feed.xml).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Keep only offers marked available.
    #[arg(long = "only-available")]
    pub only_available: bool,

    /// Run the full pipeline without writing the feed file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
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
