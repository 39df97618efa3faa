//! Budget convergence before fine-tuning.
//!
//! The capped quantile can overshoot the budget (ties, orphan removal, the
//! cap itself). The loop lowers the threshold in fixed steps until the
//! realized remaining fraction reaches the budget.

use super::engine::{GatePruner, PruneMode};
use super::metrics::PruneMetrics;
use super::threshold::check_fraction;
use crate::device::ComputeDevice;
use crate::error::{Error, Result};
use crate::gate::PrunableBlock;
use crate::registry::GatedModel;
use serde::Serialize;

/// Result of [`GatePruner::prepare_for_finetuning`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinetuneOutcome {
    /// Final threshold; every block is pruned against it.
    pub threshold: f32,
    /// Realized remaining fraction, at least the budget.
    pub remaining: f64,
    /// Number of threshold decrements taken.
    pub iterations: usize,
    /// Device the fine-tuning run is bound for.
    pub device: ComputeDevice,
    pub metrics: PruneMetrics,
}

impl GatePruner {
    /// Reshape gates with `beta`/`gamma`, then prune until at least
    /// `budget` of the gates remain.
    ///
    /// Fails with [`Error::ThresholdUnderflow`] when the threshold drops one
    /// step below the smallest gate and the budget is still unmet.
    pub fn prepare_for_finetuning<M: GatedModel>(
        &mut self,
        model: &mut M,
        beta: f32,
        gamma: f32,
        device: ComputeDevice,
        budget: f64,
    ) -> Result<FinetuneOutcome> {
        check_fraction(budget)?;
        for block in model.blocks_mut() {
            block.set_beta_gamma(beta, gamma);
        }

        let step = self.config().threshold_step();
        let floor = self
            .collect_zetas(model)?
            .into_iter()
            .fold(f32::INFINITY, f32::min)
            - step;

        let mut threshold = self
            .apply_prune(model, budget, PruneMode::Finetune, None)?
            .threshold;
        let mut remaining = self.remaining_fraction(model);
        let mut iterations = 0usize;

        while remaining < budget {
            threshold -= step;
            if threshold < floor {
                return Err(Error::ThresholdUnderflow {
                    threshold,
                    floor,
                    remaining,
                    budget,
                });
            }
            self.apply_prune(model, budget, PruneMode::Finetune, Some(threshold))?;
            remaining = self.remaining_fraction(model);
            iterations += 1;
        }

        tracing::info!(
            threshold,
            remaining,
            budget,
            iterations,
            %device,
            "pruned model ready for fine-tuning"
        );

        let mut metrics = PruneMetrics::collect(model, budget, threshold);
        metrics.iterations = iterations;
        Ok(FinetuneOutcome {
            threshold,
            remaining,
            iterations,
            device,
            metrics,
        })
    }
}
