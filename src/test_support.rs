//! Shared fixtures for unit tests.

use crate::gate::{GateMask, GateState, PrunableBlock};
use crate::registry::GateRegistry;
use ndarray::Array1;

/// Block whose `zeta_t` and `zeta_i` are stored directly.
#[derive(Debug, Clone)]
pub struct FixedGates {
    pub zeta_t: Array1<f32>,
    pub zeta_i: Array1<f32>,
    pub is_imp: bool,
    pub beta_gamma: Option<(f32, f32)>,
    pub state: GateState,
}

impl FixedGates {
    pub fn new(values: &[f32]) -> Self {
        let zeta_t = Array1::from(values.to_vec());
        Self {
            zeta_i: zeta_t.clone(),
            zeta_t,
            is_imp: false,
            beta_gamma: None,
            state: GateState::Active,
        }
    }

    pub fn important(mut self) -> Self {
        self.is_imp = true;
        self
    }

    pub fn with_anchor(mut self, anchor: &[f32]) -> Self {
        self.zeta_i = Array1::from(anchor.to_vec());
        self
    }
}

impl PrunableBlock for FixedGates {
    fn num_gates(&self) -> usize {
        self.zeta_t.len()
    }

    fn zeta_t(&self) -> Array1<f32> {
        self.zeta_t.clone()
    }

    fn zeta_i(&self) -> Array1<f32> {
        self.zeta_i.clone()
    }

    fn state(&self) -> &GateState {
        &self.state
    }

    fn prune(&mut self, threshold: f32) {
        self.state = GateState::Pruned(GateMask::from_threshold(&self.zeta_t, threshold));
    }

    fn unprune(&mut self) {
        self.state = GateState::Active;
    }

    fn set_beta_gamma(&mut self, beta: f32, gamma: f32) {
        self.beta_gamma = Some((beta, gamma));
    }

    fn is_imp(&self) -> bool {
        self.is_imp
    }

    fn zero_gates(&mut self) {
        self.state = GateState::Pruned(GateMask::zeros(self.num_gates()));
    }
}

/// Registry of `FixedGates` named `b0`, `b1`, ...
pub fn registry_of(blocks: Vec<FixedGates>) -> GateRegistry<FixedGates> {
    let mut registry = GateRegistry::new();
    for (i, block) in blocks.into_iter().enumerate() {
        registry
            .register(format!("b{i}"), block)
            .expect("fixture blocks are well formed");
    }
    registry
}

/// `n` evenly spaced gate values in `(0, 1)`.
pub fn uniform_gates(n: usize) -> Vec<f32> {
    (0..n).map(|i| (i as f32 + 0.5) / n as f32).collect()
}
