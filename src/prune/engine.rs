//! Model-wide pruning engine.
//!
//! One threshold per pass, applied uniformly to every registered block. The
//! engine owns no gates; it asks each block to freeze or release itself.

use super::config::PrunerConfig;
use super::crispness::{self, CrispnessLoss};
use super::diagnosis::{self, Diagnosis};
use super::threshold::{self, check_fraction};
use crate::device::ComputeDevice;
use crate::error::{Error, Result};
use crate::gate::PrunableBlock;
use crate::registry::GatedModel;
use serde::{Deserialize, Serialize};

/// What a prune pass is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PruneMode {
    /// Architecture search: report structural problems, leave them in place.
    #[default]
    Search,
    /// Preparing the pruned network for fine-tuning: excise orphans.
    Finetune,
}

/// Result of [`GatePruner::apply_prune`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PruneOutcome {
    /// Threshold actually applied.
    pub threshold: f32,
    /// Quantile before capping; `None` when the caller passed a threshold.
    pub raw_threshold: Option<f32>,
    /// Only filled in `Search` mode.
    pub diagnosis: Option<Diagnosis>,
    /// Gates zeroed by orphan removal (`Finetune` mode).
    pub orphans_removed: usize,
}

impl PruneOutcome {
    /// True when the computed threshold hit the cap.
    pub fn was_capped(&self) -> bool {
        self.raw_threshold.is_some_and(|raw| raw > self.threshold)
    }
}

/// Threshold solver and prune/unprune driver.
///
/// # Example
///
/// ```
/// use podar::gate::PrunableNorm;
/// use podar::prune::{GatePruner, PruneMode};
/// use podar::registry::GateRegistry;
///
/// let mut model = GateRegistry::new();
/// model.register("conv1.bn", PrunableNorm::seeded(16, 7)).unwrap();
///
/// let mut pruner = GatePruner::default();
/// let outcome = pruner.apply_prune(&mut model, 0.5, PruneMode::Search, None).unwrap();
/// assert!(outcome.threshold <= 0.9);
/// pruner.revert_prune(&mut model);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GatePruner {
    config: PrunerConfig,
    last_threshold: Option<f32>,
}

impl GatePruner {
    pub fn new(config: PrunerConfig) -> Result<Self> {
        config.validate().map_err(Error::InvalidConfig)?;
        Ok(Self {
            config,
            last_threshold: None,
        })
    }

    pub fn config(&self) -> &PrunerConfig {
        &self.config
    }

    /// Uncapped quantile from the most recent computed-threshold pass.
    pub fn last_threshold(&self) -> Option<f32> {
        self.last_threshold
    }

    /// Every gate value of the model, in traversal order.
    pub fn collect_zetas<M: GatedModel>(&self, model: &M) -> Result<Vec<f32>> {
        threshold::collect_zetas(model)
    }

    /// Gate value below which `1 - target_fraction` of all gates fall.
    pub fn compute_threshold<M: GatedModel>(&self, model: &M, target_fraction: f64) -> Result<f32> {
        check_fraction(target_fraction)?;
        let zetas = self.collect_zetas(model)?;
        threshold::quantile_threshold(&zetas, target_fraction)
    }

    /// Freeze every block against one threshold.
    ///
    /// Without an explicit `threshold` the quantile for `target_fraction`
    /// is computed and capped at `max_threshold`. An explicit threshold is
    /// used as given.
    pub fn apply_prune<M: GatedModel>(
        &mut self,
        model: &mut M,
        target_fraction: f64,
        mode: PruneMode,
        threshold: Option<f32>,
    ) -> Result<PruneOutcome> {
        check_fraction(target_fraction)?;
        let (applied, raw) = match threshold {
            Some(t) if t.is_nan() => {
                return Err(Error::InvalidConfig(
                    "explicit threshold must not be NaN".to_string(),
                ))
            }
            Some(t) => (t, None),
            None => {
                let raw = self.compute_threshold(model, target_fraction)?;
                self.last_threshold = Some(raw);
                (raw.min(self.config.max_threshold()), Some(raw))
            }
        };

        model.reset_orphans();
        for block in model.blocks_mut() {
            block.prune(applied);
        }
        tracing::debug!(
            threshold = applied,
            raw = ?raw,
            ?mode,
            "applied prune pass"
        );

        let mut outcome = PruneOutcome {
            threshold: applied,
            raw_threshold: raw,
            diagnosis: None,
            orphans_removed: 0,
        };
        match mode {
            PruneMode::Finetune => {
                outcome.orphans_removed = model.remove_orphans();
                if outcome.orphans_removed > 0 {
                    tracing::debug!(gates = outcome.orphans_removed, "removed orphaned gates");
                }
            }
            PruneMode::Search => {
                outcome.diagnosis = diagnosis::diagnose(model);
                if let Some(found) = outcome.diagnosis {
                    tracing::warn!(diagnosis = %found, threshold = applied, "structural problem after prune");
                }
            }
        }
        Ok(outcome)
    }

    /// Release every block back to continuous gates. Idempotent.
    pub fn revert_prune<M: GatedModel>(&self, model: &mut M) {
        for block in model.blocks_mut() {
            block.unprune();
        }
        model.reset_orphans();
    }

    pub fn diagnose<M: GatedModel>(&self, model: &M) -> Option<Diagnosis> {
        diagnosis::diagnose(model)
    }

    /// Remaining fraction with the configured steepness.
    pub fn remaining_fraction<M: GatedModel>(&self, model: &M) -> f64 {
        crispness::remaining_fraction(model, self.config.steepness())
    }

    pub fn crispness_loss<M: GatedModel>(
        &self,
        model: &M,
        device: ComputeDevice,
    ) -> Result<CrispnessLoss> {
        crispness::crispness_loss(model, device)
    }
}
