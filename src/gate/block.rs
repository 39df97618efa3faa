//! The prunable block capability and its gate state.

use super::mask::GateMask;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Gate state of one block.
///
/// While `Active` the gates are continuous and trainable; `Pruned` carries
/// the frozen binary mask that replaces them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    #[default]
    Active,
    Pruned(GateMask),
}

impl GateState {
    pub fn is_pruned(&self) -> bool {
        matches!(self, GateState::Pruned(_))
    }

    /// The frozen mask, defined only when pruned.
    pub fn mask(&self) -> Option<&GateMask> {
        match self {
            GateState::Active => None,
            GateState::Pruned(mask) => Some(mask),
        }
    }

    /// Pruned with every gate removed.
    pub fn is_fully_zeroed(&self) -> bool {
        self.mask().is_some_and(GateMask::is_fully_removed)
    }
}

/// A gate-bearing normalization unit.
///
/// Implementors own `num_gates` gate scalars. The pruning engine reads them,
/// asks the block to freeze them against a threshold and later to release
/// them again; it never computes the per-gate decision itself.
pub trait PrunableBlock: fmt::Debug {
    /// Number of gates, fixed at construction.
    fn num_gates(&self) -> usize;

    /// Current continuous gate values.
    fn zeta_t(&self) -> Array1<f32>;

    /// Crispness anchor the gates are pulled toward.
    fn zeta_i(&self) -> Array1<f32>;

    fn state(&self) -> &GateState;

    /// Freeze gates: `zeta_t >= threshold` is kept, everything else removed.
    fn prune(&mut self, threshold: f32);

    /// Return to continuous, trainable gates.
    fn unprune(&mut self);

    fn set_beta_gamma(&mut self, beta: f32, gamma: f32);

    /// Structurally required: fully zeroing it breaks the network.
    fn is_imp(&self) -> bool;

    /// Freeze with every gate removed. Used by orphan removal.
    fn zero_gates(&mut self);

    fn is_pruned(&self) -> bool {
        self.state().is_pruned()
    }

    fn pruned_zeta(&self) -> Option<&GateMask> {
        self.state().mask()
    }
}

impl<B: PrunableBlock + ?Sized> PrunableBlock for Box<B> {
    fn num_gates(&self) -> usize {
        (**self).num_gates()
    }

    fn zeta_t(&self) -> Array1<f32> {
        (**self).zeta_t()
    }

    fn zeta_i(&self) -> Array1<f32> {
        (**self).zeta_i()
    }

    fn state(&self) -> &GateState {
        (**self).state()
    }

    fn prune(&mut self, threshold: f32) {
        (**self).prune(threshold);
    }

    fn unprune(&mut self) {
        (**self).unprune();
    }

    fn set_beta_gamma(&mut self, beta: f32, gamma: f32) {
        (**self).set_beta_gamma(beta, gamma);
    }

    fn is_imp(&self) -> bool {
        (**self).is_imp()
    }

    fn zero_gates(&mut self) {
        (**self).zero_gates();
    }
}
