//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "fireems",
    version,
    about = "FireEMS CAD importer - map, transform and validate CAD exports",
    long_about = "Map Computer-Aided Dispatch exports onto FireEMS tool schemas.\n\n\
                  Reads CSV, Excel, JSON, XML and delimited text exports, suggests\n\
                  field mappings, applies saved mappings and validates the result."
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

    /// Include cell values in trace logs (they may contain addresses or patient data).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse a file and show its columns, detected types and row counts.
    Inspect(InspectArgs),

    /// Suggest a mapping from a file's columns to a tool schema.
    Suggest(SuggestArgs),

    /// Transform and validate a file with a saved mapping.
    Run(RunArgs),

    /// List the built-in tool schemas.
    Tools,

    /// Extract structured fields from narrative text.
    Narrative(NarrativeArgs),
}

/// Destination schema: a built-in tool or a JSON schema file.
#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct SchemaArgs {
    /// Built-in tool id (see `fireems tools`).
    #[arg(long = "tool", value_name = "ID")]
    pub tool: Option<String>,

    /// JSON schema file (a tool schema object or an array of fields).
    #[arg(long = "schema", value_name = "PATH")]
    pub schema: Option<PathBuf>,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// CAD export to read.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Rows to sample (0 reads every row).
    #[arg(long = "sample", value_name = "N", default_value_t = 100)]
    pub sample: usize,
}

#[derive(Parser)]
pub struct SuggestArgs {
    /// CAD export to read.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub schema: SchemaArgs,

    /// Drop suggestions scoring below this (0-100).
    #[arg(long = "min-confidence", value_name = "N", default_value_t = 0.0)]
    pub min_confidence: f64,

    /// Write the draft mapping profile to this path.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct RunArgs {
    /// CAD export to read.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Saved mapping profile (JSON).
    #[arg(long = "mapping", short = 'm', value_name = "PATH")]
    pub mapping: PathBuf,

    #[command(flatten)]
    pub schema: SchemaArgs,

    /// Write `{data, errors}` JSON to this path.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Exit with status 1 when any validation error is found.
    #[arg(long = "fail-on-errors")]
    pub fail_on_errors: bool,

    /// Validation errors listed individually (the rest are counted).
    #[arg(long = "max-errors", value_name = "N", default_value_t = 20)]
    pub max_errors: usize,
}

#[derive(Parser)]
pub struct NarrativeArgs {
    /// Narrative text to parse.
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Field to extract; repeat for several (default: all).
    #[arg(long = "field", value_name = "ID")]
    pub fields: Vec<String>,
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
