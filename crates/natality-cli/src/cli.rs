//! CLI argument definitions for the natality pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use natality_cli::config::DEFAULT_CONFIG_FILE;

#[derive(Parser)]
#[command(
    name = "natality",
    version,
    about = "Seasonal analysis of US natality records",
    long_about = "Harmonize yearly US birth-record exports, aggregate them into monthly\n\
                  series, and decompose the birth counts into a yearly baseline and a\n\
                  seasonal residual."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Pipeline configuration file.
    #[arg(
        long = "config",
        short = 'c',
        value_name = "PATH",
        default_value = DEFAULT_CONFIG_FILE,
        global = true
    )]
    pub config: PathBuf,

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
    /// Harmonize the yearly birth exports into one dated table.
    Harmonize,

    /// Build monthly series from the harmonized table and write model data.
    Aggregate(AggregateArgs),

    /// Decompose the birth series and print the seasonal report.
    Model,

    /// List the code dictionary.
    Codes,
}

#[derive(Parser)]
pub struct AggregateArgs {
    /// Print every month of the birth series.
    #[arg(long = "show-series")]
    pub show_series: bool,
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
