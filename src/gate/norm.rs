//! Reference gated normalization block.
//!
//! Each channel owns a raw learnable parameter `zeta`. Two smooth maps turn it
//! into gates:
//!
//! - `zeta_i = 1 / (1 + exp(-beta * zeta))` (generalized logistic)
//! - `zeta_t = 1 - exp(-gamma * zeta_i) + zeta_i * exp(-gamma)` (continuous Heaviside)
//!
//! Raising `beta` and `gamma` during training sharpens both maps so that
//! `zeta_t` lands on 0 or 1. `zeta_t` and `zeta_i` coincide exactly at those
//! two points, which is what the crispness loss exploits.

use super::block::{GateState, PrunableBlock};
use super::mask::GateMask;
use crate::error::{Error, Result};
use ndarray::{Array1, Array2};
use rand::Rng;
use rand::SeedableRng;

pub const DEFAULT_BETA: f32 = 1.0;
pub const DEFAULT_GAMMA: f32 = 2.0;

/// Upper bound of the uniform initialization of raw `zeta`.
const INIT_SCALE: f32 = 0.01;

/// Gate-bearing normalization unit with continuous-Heaviside gates.
#[derive(Debug, Clone, PartialEq)]
pub struct PrunableNorm {
    zeta: Array1<f32>,
    beta: f32,
    gamma: f32,
    is_imp: bool,
    state: GateState,
}

impl PrunableNorm {
    /// New block with raw `zeta` drawn uniformly from `[0, 0.01)`.
    pub fn new<R: Rng>(num_gates: usize, rng: &mut R) -> Self {
        let zeta = (0..num_gates)
            .map(|_| rng.random::<f32>() * INIT_SCALE)
            .collect::<Vec<_>>();
        Self::from_zeta(zeta)
    }

    /// Deterministic initialization from a seed.
    pub fn seeded(num_gates: usize, seed: u64) -> Self {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        Self::new(num_gates, &mut rng)
    }

    /// Block with explicit raw parameter values.
    pub fn from_zeta(zeta: Vec<f32>) -> Self {
        Self {
            zeta: Array1::from(zeta),
            beta: DEFAULT_BETA,
            gamma: DEFAULT_GAMMA,
            is_imp: false,
            state: GateState::Active,
        }
    }

    /// Mark the block as structurally important.
    pub fn with_importance(mut self, is_imp: bool) -> Self {
        self.is_imp = is_imp;
        self
    }

    pub fn with_beta_gamma(mut self, beta: f32, gamma: f32) -> Self {
        self.beta = beta;
        self.gamma = gamma;
        self
    }

    /// Raw learnable parameter.
    pub fn zeta(&self) -> &Array1<f32> {
        &self.zeta
    }

    pub fn beta(&self) -> f32 {
        self.beta
    }

    pub fn gamma(&self) -> f32 {
        self.gamma
    }

    /// Restore a frozen mask, e.g. from a snapshot.
    pub fn freeze(&mut self, mask: GateMask) -> Result<()> {
        if mask.len() != self.num_gates() {
            return Err(Error::GateShapeMismatch {
                block: "PrunableNorm".to_string(),
                expected: self.num_gates(),
                got: mask.len(),
            });
        }
        self.state = GateState::Pruned(mask);
        Ok(())
    }

    /// Per-channel multiplier applied to the normalized output.
    pub fn channel_scales(&self) -> Array1<f32> {
        match &self.state {
            GateState::Active => self.zeta_t(),
            GateState::Pruned(mask) => mask.to_array(),
        }
    }

    /// Scale a `[batch, channels]` activation by the channel gates.
    pub fn scale_channels(&self, x: &Array2<f32>) -> Result<Array2<f32>> {
        let channels = x.ncols();
        if channels != self.num_gates() {
            return Err(Error::GateShapeMismatch {
                block: "PrunableNorm".to_string(),
                expected: self.num_gates(),
                got: channels,
            });
        }
        let scales = self.channel_scales();
        Ok(x * &scales)
    }

    /// Chain a gate gradient back to the raw parameter.
    ///
    /// `grad_zeta_t` and `grad_zeta_i` are dL/d`zeta_t` and dL/d`zeta_i`;
    /// pass zeros for `grad_zeta_i` when the anchor is treated as constant.
    pub fn backward_zeta(
        &self,
        grad_zeta_t: &Array1<f32>,
        grad_zeta_i: &Array1<f32>,
    ) -> Result<Array1<f32>> {
        for grad in [grad_zeta_t, grad_zeta_i] {
            if grad.len() != self.num_gates() {
                return Err(Error::GateShapeMismatch {
                    block: "PrunableNorm".to_string(),
                    expected: self.num_gates(),
                    got: grad.len(),
                });
            }
        }
        let zi = self.zeta_i();
        let decay = (-self.gamma).exp();
        let dzt_dzi = zi.mapv(|v| self.gamma * (-self.gamma * v).exp() + decay);
        let dzi_dzeta = zi.mapv(|v| self.beta * v * (1.0 - v));
        Ok((grad_zeta_t * &dzt_dzi + grad_zeta_i) * &dzi_dzeta)
    }

    /// Plain gradient step on the raw parameter. Refused while pruned.
    pub fn sgd_step(&mut self, grad_zeta: &Array1<f32>, lr: f32) -> Result<()> {
        if self.state.is_pruned() {
            return Err(Error::FrozenGates {
                block: "PrunableNorm".to_string(),
            });
        }
        if grad_zeta.len() != self.num_gates() {
            return Err(Error::GateShapeMismatch {
                block: "PrunableNorm".to_string(),
                expected: self.num_gates(),
                got: grad_zeta.len(),
            });
        }
        self.zeta.scaled_add(-lr, grad_zeta);
        Ok(())
    }

    fn generalized_logistic(&self, x: f32) -> f32 {
        1.0 / (1.0 + (-self.beta * x).exp())
    }

    fn continuous_heaviside(&self, x: f32) -> f32 {
        1.0 - (-self.gamma * x).exp() + x * (-self.gamma).exp()
    }
}

impl PrunableBlock for PrunableNorm {
    fn num_gates(&self) -> usize {
        self.zeta.len()
    }

    fn zeta_t(&self) -> Array1<f32> {
        self.zeta_i().mapv(|v| self.continuous_heaviside(v))
    }

    fn zeta_i(&self) -> Array1<f32> {
        self.zeta.mapv(|v| self.generalized_logistic(v))
    }

    fn state(&self) -> &GateState {
        &self.state
    }

    fn prune(&mut self, threshold: f32) {
        self.state = GateState::Pruned(GateMask::from_threshold(&self.zeta_t(), threshold));
    }

    fn unprune(&mut self) {
        self.state = GateState::Active;
    }

    fn set_beta_gamma(&mut self, beta: f32, gamma: f32) {
        self.beta = beta;
        self.gamma = gamma;
    }

    fn is_imp(&self) -> bool {
        self.is_imp
    }

    fn zero_gates(&mut self) {
        self.state = GateState::Pruned(GateMask::zeros(self.num_gates()));
    }
}
