//! Pruning metrics collection
//!
//! Snapshot of what a prune pass or a fine-tuning preparation achieved.

use super::diagnosis::Diagnosis;
use crate::gate::{GateState, PrunableBlock};
use crate::registry::GatedModel;
use serde::{Deserialize, Serialize};

/// Metrics collected after pruning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PruneMetrics {
    /// Requested fraction of gates to keep.
    pub budget: f64,
    /// Threshold that was applied.
    pub threshold: f32,
    /// Realized remaining fraction.
    pub remaining_fraction: f64,
    /// Total gates in the model.
    pub total_gates: usize,
    /// Gates kept by the frozen masks (active blocks count gates >= 0.5).
    pub kept_gates: usize,
    /// Per-block remaining fraction.
    pub layer_remaining: Vec<(String, f64)>,
    /// Structural diagnosis at collection time.
    pub diagnosis: Option<Diagnosis>,
    /// Threshold decrements taken by the fine-tuning loop.
    pub iterations: usize,
}

impl PruneMetrics {
    /// Create new metrics with a budget.
    pub fn new(budget: f64) -> Self {
        Self {
            budget,
            ..Default::default()
        }
    }

    /// Fill gate counts and per-layer fractions from the model.
    pub fn collect<M: GatedModel>(model: &M, budget: f64, threshold: f32) -> Self {
        let mut metrics = Self::new(budget);
        metrics.threshold = threshold;
        for (name, block) in model.named_blocks() {
            let kept = kept_gates(block);
            metrics.total_gates += block.num_gates();
            metrics.kept_gates += kept;
            metrics.add_layer_remaining(name, fraction(kept, block.num_gates()));
        }
        metrics.remaining_fraction = fraction(metrics.kept_gates, metrics.total_gates);
        metrics.diagnosis = super::diagnosis::diagnose(model);
        metrics
    }

    /// Add layer remaining fraction.
    pub fn add_layer_remaining(&mut self, name: impl Into<String>, remaining: f64) {
        self.layer_remaining.push((name.into(), remaining));
    }

    /// Get budget gap (budget - achieved); negative when over budget.
    pub fn budget_gap(&self) -> f64 {
        self.budget - self.remaining_fraction
    }

    /// Check if the budget was met.
    pub fn budget_met(&self) -> bool {
        self.remaining_fraction >= self.budget - 1e-6
    }
}

/// Hard count of kept gates: mask sum when pruned, `zeta_t >= 0.5` when active.
pub(crate) fn kept_gates<B: PrunableBlock + ?Sized>(block: &B) -> usize {
    match block.state() {
        GateState::Pruned(mask) => mask.kept(),
        GateState::Active => block.zeta_t().iter().filter(|&&z| z >= 0.5).count(),
    }
}

pub(crate) fn fraction(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}
