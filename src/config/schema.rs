//! YAML schema of a prune run

use crate::gate::{DEFAULT_BETA, DEFAULT_GAMMA};
use crate::prune::PrunerConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_beta() -> f32 {
    DEFAULT_BETA
}

fn default_gamma() -> f32 {
    DEFAULT_GAMMA
}

fn default_device() -> String {
    "cpu".to_string()
}

fn default_histogram_bins() -> usize {
    10
}

/// Complete prune specification
///
/// ```yaml
/// gates: resnet56_gates.yaml
/// budget: 0.4
/// beta: 5.0
/// gamma: 8.0
/// device: cuda:0
/// pruner:
///   max_threshold: 0.9
///   threshold_step: 0.0001
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PruneSpec {
    /// Gate snapshot, relative paths resolve against the spec file.
    pub gates: PathBuf,

    /// Fraction of gates to keep.
    pub budget: f64,

    #[serde(default = "default_beta")]
    pub beta: f32,

    #[serde(default = "default_gamma")]
    pub gamma: f32,

    /// `cpu`, `cuda`, `cuda:N` or `auto`.
    #[serde(default = "default_device")]
    pub device: String,

    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,

    #[serde(default)]
    pub pruner: PrunerConfig,
}

impl PruneSpec {
    /// Spec for `gates` with every optional field at its default.
    pub fn new(gates: impl Into<PathBuf>, budget: f64) -> Self {
        Self {
            gates: gates.into(),
            budget,
            beta: default_beta(),
            gamma: default_gamma(),
            device: default_device(),
            histogram_bins: default_histogram_bins(),
            pruner: PrunerConfig::default(),
        }
    }
}
