//! CLI argument definitions for the dosimetry toolkit.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "dosim",
    version,
    about = "Dosimetry toolkit - compose dose grids and classify scorecard metrics",
    long_about = "Evaluate dose-composition operation trees against local grid stores\n\
                  and classify metric values into scorecard objective bins.\n\
                  All evaluation is local; nothing is sent to a remote service."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    /// Validate and evaluate a dose-composition task against a grid store.
    Compose(ComposeArgs),

    /// Classify metric values against a scorecard objective list.
    Classify(ClassifyArgs),

    /// List the supported computed-metric types and their arguments.
    MetricTypes,
}

#[derive(Parser)]
pub struct ComposeArgs {
    /// Path to the dose-composition task JSON.
    #[arg(value_name = "TASK")]
    pub task: PathBuf,

    /// Path to the grid store JSON (doses and registrations by id).
    #[arg(long = "store", value_name = "STORE")]
    pub store: PathBuf,

    /// Write the composed grid to this file.
    #[arg(long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Validate and report without writing the composed grid.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct ClassifyArgs {
    /// Path to the objective list JSON (ordered array of bins).
    #[arg(value_name = "OBJECTIVES")]
    pub objectives: PathBuf,

    /// Metric values to classify.
    #[arg(value_name = "VALUE", required = true, allow_negative_numbers = true)]
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
