//! Prune command implementation

use super::Session;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::PruneArgs;
use crate::prune::{ArchitectureSummary, PruneMode};

pub fn run_prune(args: PruneArgs, level: LogLevel) -> Result<(), String> {
    let mut session = Session::open(&args.spec)?;
    let budget = session.budget(args.budget);

    let outcome = session
        .pruner
        .apply_prune(&mut session.model, budget, PruneMode::Search, args.threshold)
        .map_err(|e| e.to_string())?;
    let remaining = session.pruner.remaining_fraction(&session.model);

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Pruned at threshold {:.6}: remaining fraction {remaining:.4} (budget {budget})",
            outcome.threshold
        ),
    );
    let diagnosis = outcome
        .diagnosis
        .map_or_else(|| "sound".to_string(), |d| d.to_string());
    log(level, LogLevel::Normal, &format!("Diagnosis: {diagnosis}"));
    log(
        level,
        LogLevel::Verbose,
        &ArchitectureSummary::collect(&session.model).to_string(),
    );

    Ok(())
}
