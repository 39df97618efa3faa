//! Finetune command implementation

use super::Session;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::FinetuneArgs;
use crate::prune::ArchitectureSummary;
use crate::snapshot::GateSnapshot;

pub fn run_finetune(args: FinetuneArgs, level: LogLevel) -> Result<(), String> {
    let mut session = Session::open(&args.spec)?;
    let Session {
        spec,
        model,
        pruner,
        device,
    } = &mut session;

    let outcome = pruner
        .prepare_for_finetuning(model, spec.beta, spec.gamma, *device, spec.budget)
        .map_err(|e| e.to_string())?;

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Ready for fine-tuning on {}: threshold {:.6}, remaining fraction {:.4} after {} steps",
            outcome.device, outcome.threshold, outcome.remaining, outcome.iterations
        ),
    );
    log(
        level,
        LogLevel::Normal,
        &format!(
            "Kept {} of {} gates",
            outcome.metrics.kept_gates, outcome.metrics.total_gates
        ),
    );
    log(
        level,
        LogLevel::Normal,
        &format!(
            "Budget {:.4} met: {} (gap {:+.4})",
            outcome.metrics.budget,
            outcome.metrics.budget_met(),
            outcome.metrics.budget_gap()
        ),
    );
    log(
        level,
        LogLevel::Verbose,
        &ArchitectureSummary::collect(&*model).to_string(),
    );

    if let Some(output) = &args.output {
        GateSnapshot::from_registry(model)
            .save(output)
            .map_err(|e| format!("Failed to save snapshot: {e}"))?;
        log(
            level,
            LogLevel::Normal,
            &format!("Saved pruned gates to {}", output.display()),
        );
    }

    Ok(())
}
