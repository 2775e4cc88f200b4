//! CLI argument definitions for the dataprep pipelines.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use dataprep_cli::pipeline::PipelineOptions;
use dataprep_model::MissingValuePolicy;

#[derive(Parser)]
#[command(
    name = "dataprep",
    version,
    about = "Batch ETL for product listings and job postings",
    long_about = "Clean tabular CSV datasets and write multi-sheet XLSX reports.\n\n\
                  Each pipeline extracts a CSV, profiles it, cleans and enriches\n\
                  the rows, computes demographics, and writes one workbook."
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
    /// Clean an e-commerce product-listings CSV and report on it.
    Products(RunArgs),

    /// Clean a job-recruitment postings CSV and report on it.
    Recruitment(RecruitmentArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Path to the input CSV file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output directory for generated files (default: <INPUT dir>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Workbook file name inside the output directory.
    #[arg(long = "report-name", value_name = "NAME")]
    pub report_name: Option<String>,

    /// Skip the pre-transform profiling dump.
    #[arg(long = "no-profile")]
    pub no_profile: bool,
}

impl From<RunArgs> for PipelineOptions {
    fn from(args: RunArgs) -> Self {
        Self {
            input: args.input,
            output_dir: args.output_dir,
            report_name: args.report_name,
            profile: !args.no_profile,
        }
    }
}

#[derive(Parser)]
pub struct RecruitmentArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// How unfillable gaps are represented in the output.
    #[arg(long = "policy", value_enum, default_value = "preserve")]
    pub policy: PolicyArg,
}

/// Missing-value policy choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    /// Leave gaps as nulls.
    Preserve,
    /// Fill gaps with sentinel values ("Not Specified", "-", 0).
    Sentinel,
}

impl From<PolicyArg> for MissingValuePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Preserve => MissingValuePolicy::Preserve,
            PolicyArg::Sentinel => MissingValuePolicy::Sentinel,
        }
    }
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
