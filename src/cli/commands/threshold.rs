//! Threshold command implementation

use super::Session;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::ThresholdArgs;

pub fn run_threshold(args: ThresholdArgs, level: LogLevel) -> Result<(), String> {
    let session = Session::open(&args.spec)?;
    let budget = session.budget(args.budget);

    let raw = session
        .pruner
        .compute_threshold(&session.model, budget)
        .map_err(|e| e.to_string())?;
    let capped = raw.min(session.pruner.config().max_threshold());

    log(level, LogLevel::Normal, &format!("Threshold: {capped:.6}"));
    if capped < raw {
        log(
            level,
            LogLevel::Normal,
            &format!("  (quantile {raw:.6} capped at {capped})"),
        );
    }
    log(level, LogLevel::Verbose, &format!("  Budget: {budget}"));

    Ok(())
}
