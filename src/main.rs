//! Podar CLI
//!
//! # Usage
//!
//! ```bash
//! # Check a spec and its gate snapshot
//! podar validate prune.yaml
//!
//! # Threshold for another budget
//! podar threshold prune.yaml --budget 0.3
//!
//! # Search-mode prune pass with diagnosis
//! podar prune prune.yaml --threshold 0.7
//!
//! # Converge on the budget and save the pruned gates
//! podar finetune prune.yaml --output pruned.yaml
//!
//! # Gate histogram and per-layer widths
//! podar stats prune.yaml --json
//! ```

use clap::Parser;
use podar::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
