//! Validate command implementation

use super::Session;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::ValidateArgs;
use crate::registry::GatedModel;

/// Format the run settings as a string
pub(super) fn format_run_info(session: &Session) -> String {
    let spec = &session.spec;
    [
        format!("  Gates: {}", spec.gates.display()),
        format!("  Budget: {}", spec.budget),
        format!("  Beta/gamma: {}/{}", spec.beta, spec.gamma),
        format!("  Device: {}", session.device),
        format!("  Max threshold: {}", spec.pruner.max_threshold()),
        format!("  Threshold step: {}", spec.pruner.threshold_step()),
    ]
    .join("\n")
}

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Validating spec: {}", args.spec.display()),
    );

    let session = Session::open(&args.spec)?;

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Spec is valid: {} blocks, {} gates",
            session.model.len(),
            session.model.total_gates()
        ),
    );
    log(level, LogLevel::Verbose, &format_run_info(&session));

    Ok(())
}
