//! Gate-based structured pruning
//!
//! Every prunable block carries one gate per channel. Pruning picks a single
//! model-wide threshold from the gate distribution so that a target fraction
//! of gates survives, freezes each block against it, and reports structural
//! problems the cut left behind.
//!
//! - **Threshold solver**: quantile of all gate values, capped for search
//! - **Pruning engine**: uniform prune/unprune over the registry
//! - **Fine-tuning loop**: lowers the threshold until the budget is met
//! - **Diagnosis**: broken important blocks and removable orphans
//! - **Crispness loss**: pulls gates toward their binary anchors
//!
//! # Example
//!
//! ```
//! use podar::device::ComputeDevice;
//! use podar::gate::PrunableNorm;
//! use podar::prune::GatePruner;
//! use podar::registry::GateRegistry;
//!
//! let mut model = GateRegistry::new();
//! model.register("layer1.bn1", PrunableNorm::seeded(32, 1)).unwrap();
//! model.register("layer1.bn2", PrunableNorm::seeded(32, 2)).unwrap();
//!
//! let mut pruner = GatePruner::default();
//! let outcome = pruner
//!     .prepare_for_finetuning(&mut model, 1.0, 2.0, ComputeDevice::Cpu, 0.5)
//!     .unwrap();
//! assert!(outcome.remaining >= 0.5);
//! ```
//!
//! # References
//!
//! - Tiwari, R., et al. (2021). ChipNet: Budget-aware pruning with Heaviside
//!   continuous approximations. ICLR.

mod config;
mod crispness;
mod diagnosis;
mod engine;
mod finetune;
mod metrics;
mod report;
mod threshold;

#[cfg(test)]
mod proptests;

pub use config::{PrunerConfig, DEFAULT_MAX_THRESHOLD, DEFAULT_STEEPNESS, DEFAULT_THRESHOLD_STEP};
pub use crispness::{
    crispness_loss, remaining_fraction, remaining_in_block, smooth_round, BlockGrad,
    CrispnessLoss,
};
pub use diagnosis::{diagnose, is_broken, Diagnosis};
pub use engine::{GatePruner, PruneMode, PruneOutcome};
pub use finetune::FinetuneOutcome;
pub use metrics::PruneMetrics;
pub use report::{ArchitectureSummary, GateStats, LayerSummary};
pub use threshold::{check_fraction, collect_zetas, quantile_rank, quantile_threshold};
