//! CLI argument definitions for the schedule-window pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "pjw",
    version,
    about = "Patient-journey schedule-window pipeline",
    long_about = "Denormalize patient-journey schedules into the\n\
                  patient_journey_schedule_window table.\n\n\
                  Parses schedule slugs into day windows around clinical\n\
                  milestones and appends only rows not already present."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

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
    /// Run the pipeline once and print a summary.
    Run(RunArgs),

    /// Run the pipeline on a fixed interval until interrupted.
    Watch(WatchArgs),

    /// Explain how a schedule slug is interpreted.
    Slug(SlugArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Print the run summary as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct WatchArgs {
    /// Seconds between runs (overrides PJW_RUN_INTERVAL_SECS, default 3600).
    #[arg(long = "interval-secs", value_name = "SECS")]
    pub interval_secs: Option<u64>,

    /// Run-duration threshold in seconds that logs an SLA warning
    /// (overrides PJW_SLA_SECS, default 600).
    #[arg(long = "sla-secs", value_name = "SECS")]
    pub sla_secs: Option<u64>,
}

#[derive(Parser)]
pub struct SlugArgs {
    /// The schedule slug to parse, e.g. 4d-2d-pre-op.
    #[arg(value_name = "SLUG")]
    pub slug: String,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
