//! CLI types - Cli, Command, and per-command argument structs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Podar: gate-based structured pruning
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "podar")]
#[command(version)]
#[command(about = "Gate-based structured pruning: thresholds, budgets and fine-tuning preparation")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Validate a prune spec and its gate snapshot
    Validate(ValidateArgs),

    /// Print the pruning threshold for a budget
    Threshold(ThresholdArgs),

    /// Apply one search-mode prune pass and report the diagnosis
    Prune(PruneArgs),

    /// Converge on the budget and prepare the model for fine-tuning
    Finetune(FinetuneArgs),

    /// Show gate statistics and the per-layer architecture
    Stats(StatsArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML prune spec
    #[arg(value_name = "SPEC")]
    pub spec: PathBuf,
}

/// Arguments for the threshold command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ThresholdArgs {
    #[arg(value_name = "SPEC")]
    pub spec: PathBuf,

    /// Override the spec budget
    #[arg(short, long)]
    pub budget: Option<f64>,
}

/// Arguments for the prune command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct PruneArgs {
    #[arg(value_name = "SPEC")]
    pub spec: PathBuf,

    /// Override the spec budget
    #[arg(short, long)]
    pub budget: Option<f64>,

    /// Use this threshold instead of computing one
    #[arg(short, long)]
    pub threshold: Option<f32>,
}

/// Arguments for the finetune command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct FinetuneArgs {
    #[arg(value_name = "SPEC")]
    pub spec: PathBuf,

    /// Write the pruned gate snapshot here
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the stats command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct StatsArgs {
    #[arg(value_name = "SPEC")]
    pub spec: PathBuf,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}
