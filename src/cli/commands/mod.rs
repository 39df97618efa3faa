//! CLI command implementations

mod finetune;
mod prune;
mod stats;
mod threshold;
mod validate;


use crate::cli::logging::init_tracing;
use crate::cli::LogLevel;
use crate::config::{load_spec, parse_device, Cli, Command, PruneSpec};
use crate::device::ComputeDevice;
use crate::prune::GatePruner;
use crate::registry::GateRegistry;
use crate::snapshot::GateSnapshot;
use std::path::Path;

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    // Configure output based on verbose/quiet flags
    let log_level = LogLevel::from_flags(cli.quiet, cli.verbose);
    init_tracing(log_level);

    match cli.command {
        Command::Validate(args) => validate::run_validate(args, log_level),
        Command::Threshold(args) => threshold::run_threshold(args, log_level),
        Command::Prune(args) => prune::run_prune(args, log_level),
        Command::Finetune(args) => finetune::run_finetune(args, log_level),
        Command::Stats(args) => stats::run_stats(args, log_level),
    }
}

/// Everything a command needs from a spec file.
struct Session {
    spec: PruneSpec,
    model: GateRegistry,
    pruner: GatePruner,
    device: ComputeDevice,
}

impl Session {
    fn open(spec_path: &Path) -> Result<Self, String> {
        let spec = load_spec(spec_path).map_err(|e| format!("Config error: {e}"))?;
        let model = GateSnapshot::load(&spec.gates)
            .and_then(GateSnapshot::into_registry)
            .map_err(|e| format!("Gate snapshot error: {e}"))?;
        let pruner = GatePruner::new(spec.pruner).map_err(|e| e.to_string())?;
        let device = parse_device(&spec.device).map_err(|e| e.to_string())?;
        Ok(Self {
            spec,
            model,
            pruner,
            device,
        })
    }

    /// Budget from the command line, falling back to the spec.
    fn budget(&self, override_budget: Option<f64>) -> f64 {
        override_budget.unwrap_or(self.spec.budget)
    }
}
