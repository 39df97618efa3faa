//! Stats command implementation

use super::Session;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::StatsArgs;
use crate::prune::{ArchitectureSummary, GateStats};
use serde::Serialize;

#[derive(Serialize)]
struct StatsReport {
    gates: GateStats,
    architecture: ArchitectureSummary,
    remaining_fraction: f64,
}

pub fn run_stats(args: StatsArgs, level: LogLevel) -> Result<(), String> {
    let session = Session::open(&args.spec)?;
    let report = StatsReport {
        gates: GateStats::collect(&session.model, session.spec.histogram_bins)
            .map_err(|e| e.to_string())?,
        architecture: ArchitectureSummary::collect(&session.model),
        remaining_fraction: session.pruner.remaining_fraction(&session.model),
    };

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        println!("{json}");
        return Ok(());
    }

    log(level, LogLevel::Normal, &report.gates.to_string());
    log(level, LogLevel::Normal, &report.architecture.to_string());
    log(
        level,
        LogLevel::Normal,
        &format!("Remaining fraction: {:.4}", report.remaining_fraction),
    );

    Ok(())
}
