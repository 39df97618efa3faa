//! Binary keep/remove mask frozen by a prune call.

use crate::error::{Error, Result};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Per-gate keep (`true`) or remove (`false`) decision.
///
/// Serializes as a plain list of booleans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GateMask(Vec<bool>);

impl GateMask {
    /// Keep every gate whose value is at least `threshold`.
    pub fn from_threshold(values: &Array1<f32>, threshold: f32) -> Self {
        Self(values.iter().map(|&v| v >= threshold).collect())
    }

    /// Mask that removes all `len` gates.
    pub fn zeros(len: usize) -> Self {
        Self(vec![false; len])
    }

    /// Mask that keeps all `len` gates.
    pub fn ones(len: usize) -> Self {
        Self(vec![true; len])
    }

    /// Build a mask from 0/1 floats, rejecting anything else.
    pub fn from_values(values: &[f32]) -> Result<Self> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                if v == 1.0 {
                    Ok(true)
                } else if v == 0.0 {
                    Ok(false)
                } else {
                    Err(Error::InvalidMask {
                        reason: format!("entry {i} is {v}, expected exactly 0 or 1"),
                    })
                }
            })
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of kept gates.
    pub fn kept(&self) -> usize {
        self.0.iter().filter(|&&k| k).count()
    }

    /// Number of removed gates.
    pub fn removed(&self) -> usize {
        self.len() - self.kept()
    }

    /// True when the mask has gates and none of them survived.
    ///
    /// A zero-width mask is never considered fully removed.
    pub fn is_fully_removed(&self) -> bool {
        !self.is_empty() && self.kept() == 0
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

    /// Mask as 0.0/1.0 floats, the form multiplied into channel outputs.
    pub fn to_array(&self) -> Array1<f32> {
        self.0.iter().map(|&k| if k { 1.0 } else { 0.0 }).collect()
    }
}
