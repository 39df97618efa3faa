//! Remaining-fraction estimate and the crispness loss.
//!
//! Both aggregate over every registered block. Active blocks contribute a
//! smooth count so the quantity stays differentiable during training; pruned
//! blocks contribute their frozen mask.

use crate::device::ComputeDevice;
use crate::error::{Error, Result};
use crate::gate::{GateState, PrunableBlock};
use crate::registry::GatedModel;
use ndarray::Array1;
use serde::Serialize;

/// Logistic approximation of the step at 0.5.
pub fn smooth_round(x: f32, steepness: f32) -> f32 {
    1.0 / (1.0 + (-steepness * (x - 0.5)).exp())
}

/// Smooth or hard count of active gates in one block.
pub fn remaining_in_block<B: PrunableBlock + ?Sized>(block: &B, steepness: f32) -> f32 {
    match block.state() {
        GateState::Active => block.zeta_t().iter().map(|&z| smooth_round(z, steepness)).sum(),
        GateState::Pruned(mask) => mask.kept() as f32,
    }
}

/// Fraction of gates still active across the model, in `[0, 1]`.
///
/// A model without gates reports 0.0.
pub fn remaining_fraction<M: GatedModel>(model: &M, steepness: f32) -> f64 {
    let mut remaining = 0.0f64;
    let mut total = 0usize;
    for block in model.blocks() {
        remaining += f64::from(remaining_in_block(block, steepness));
        total += block.num_gates();
    }
    if total == 0 {
        return 0.0;
    }
    remaining / total as f64
}

/// Crispness gradients for one block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockGrad {
    /// dL/d`zeta_t`
    pub zeta_t: Array1<f32>,
    /// dL/d`zeta_i`; ignore it when the anchor is a constant.
    pub zeta_i: Array1<f32>,
}

/// Mean squared distance between gates and their anchors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrispnessLoss {
    /// Loss value.
    pub value: f32,
    /// Device the loss is bound for.
    pub device: ComputeDevice,
    /// Per-block gradients, in traversal order.
    pub grads: Vec<BlockGrad>,
}

/// `mean((zeta_t - zeta_i)^2)` over every gate of every block.
///
/// Fails when a block's `zeta_t` and `zeta_i` disagree in length. A model
/// without gates has a zero loss.
pub fn crispness_loss<M: GatedModel>(model: &M, device: ComputeDevice) -> Result<CrispnessLoss> {
    let mut diffs = Vec::new();
    for (name, block) in model.named_blocks() {
        let zeta_t = block.zeta_t();
        let zeta_i = block.zeta_i();
        if zeta_t.len() != zeta_i.len() {
            return Err(Error::GateShapeMismatch {
                block: name.to_string(),
                expected: zeta_t.len(),
                got: zeta_i.len(),
            });
        }
        diffs.push(zeta_t - zeta_i);
    }

    let total: usize = diffs.iter().map(|d| d.len()).sum();
    if total == 0 {
        return Ok(CrispnessLoss {
            value: 0.0,
            device,
            grads: diffs
                .into_iter()
                .map(|d| BlockGrad {
                    zeta_t: d.clone(),
                    zeta_i: d,
                })
                .collect(),
        });
    }

    let n = total as f32;
    let sum_sq: f64 = diffs
        .iter()
        .flat_map(|d| d.iter())
        .map(|&d| f64::from(d) * f64::from(d))
        .sum();
    let grads = diffs
        .into_iter()
        .map(|d| {
            let zeta_t = d.mapv(|v| 2.0 * v / n);
            let zeta_i = zeta_t.mapv(|g| -g);
            BlockGrad { zeta_t, zeta_i }
        })
        .collect();

    Ok(CrispnessLoss {
        value: (sum_sq / f64::from(n)) as f32,
        device,
        grads,
    })
}
