//! Quantile threshold over all gate values.

use crate::error::{Error, Result};
use crate::gate::PrunableBlock;
use crate::registry::GatedModel;

/// Reject fractions outside `[0, 1]` (and NaN).
pub fn check_fraction(value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidBudget { value })
    }
}

/// Concatenate every block's `zeta_t`, in traversal order.
pub fn collect_zetas<M: GatedModel>(model: &M) -> Result<Vec<f32>> {
    let mut zetas = Vec::with_capacity(model.total_gates());
    for (name, block) in model.named_blocks() {
        let zeta_t = block.zeta_t();
        if let Some(bad) = zeta_t.iter().find(|v| !v.is_finite()) {
            return Err(Error::NumericalInstability {
                block: name.to_string(),
                details: format!("non-finite gate value {bad}"),
            });
        }
        zetas.extend(zeta_t.iter().copied());
    }
    Ok(zetas)
}

/// Rank of the cut-off gate: `clamp(floor((1 - Vc) * n), 0, n - 1)`.
///
/// `Vc = 0` asks for rank `n`, which clamps to the largest gate.
pub fn quantile_rank(n: usize, target_fraction: f64) -> usize {
    if n == 0 {
        return 0;
    }
    let raw = ((1.0 - target_fraction) * n as f64).floor();
    (raw.max(0.0) as usize).min(n - 1)
}

/// Gate value at [`quantile_rank`] of the ascending sort of `values`.
pub fn quantile_threshold(values: &[f32], target_fraction: f64) -> Result<f32> {
    check_fraction(target_fraction)?;
    if values.is_empty() {
        return Err(Error::NoGates);
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f32::total_cmp);
    Ok(sorted[quantile_rank(sorted.len(), target_fraction)])
}
