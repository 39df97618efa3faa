//! Podar: gate-based structured pruning for convolutional networks
//!
//! Every prunable normalization block carries one gate per channel. Training
//! pushes the gates toward 0 or 1 with a crispness loss; pruning then picks a
//! single model-wide threshold so that a budgeted fraction of channels
//! survives, freezes each block against it, and reports layers the cut broke.
//!
//! # Modules
//!
//! - [`gate`]: block capability, gate masks and the reference [`gate::PrunableNorm`]
//! - [`registry`]: ordered block registry and orphan handling
//! - [`prune`]: threshold solver, pruning engine, fine-tuning loop, reports
//! - [`snapshot`]: gate snapshots on disk (YAML or JSON)
//! - [`config`]: prune specs and CLI arguments
//! - [`cli`]: command handlers behind the `podar` binary
//!
//! # Example
//!
//! ```
//! use podar::device::ComputeDevice;
//! use podar::gate::PrunableNorm;
//! use podar::prune::{GatePruner, PruneMode};
//! use podar::registry::GateRegistry;
//!
//! let mut model = GateRegistry::new();
//! let bn1 = model.register("layer1.0.bn1", PrunableNorm::from_zeta(vec![-2.0, 0.1, 3.0])).unwrap();
//! let bn2 = model.register("layer1.0.bn2", PrunableNorm::from_zeta(vec![1.0, -4.0])).unwrap();
//! model.chain(&[bn1, bn2]).unwrap();
//!
//! let mut pruner = GatePruner::default();
//! let search = pruner.apply_prune(&mut model, 0.6, PruneMode::Search, None).unwrap();
//! println!("threshold {} diagnosis {:?}", search.threshold, search.diagnosis);
//! pruner.revert_prune(&mut model);
//!
//! let ready = pruner
//!     .prepare_for_finetuning(&mut model, 1.0, 2.0, ComputeDevice::Cpu, 0.6)
//!     .unwrap();
//! assert!(ready.remaining >= 0.6);
//! ```

pub mod cli;
pub mod config;
pub mod device;
pub mod error;
pub mod gate;
pub mod prune;
pub mod registry;
pub mod snapshot;

#[cfg(test)]
mod test_support;

pub use device::ComputeDevice;
pub use error::{Error, Result};
pub use gate::{GateMask, GateState, PrunableBlock, PrunableNorm};
pub use prune::{Diagnosis, GatePruner, PruneMode, PrunerConfig};
pub use registry::{GateRegistry, GatedModel};
