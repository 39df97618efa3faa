//! Gate distribution statistics and per-layer architecture summary.

use super::metrics::kept_gates;
use super::threshold::collect_zetas;
use crate::error::Result;
use crate::gate::PrunableBlock;
use crate::registry::GatedModel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Distribution of `zeta_t` across the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateStats {
    pub total: usize,
    /// Gates exactly equal to 0.0.
    pub exactly_zeros: usize,
    /// Gates exactly equal to 1.0.
    pub exactly_ones: usize,
    pub min: f32,
    pub max: f32,
    pub mean: f32,
    /// Equal-width bins over `[0, 1]`; values outside are clamped into the edge bins.
    pub histogram: Vec<usize>,
}

impl GateStats {
    /// Summarize every gate of the model into `bins` histogram buckets.
    pub fn collect<M: GatedModel>(model: &M, bins: usize) -> Result<Self> {
        let zetas = collect_zetas(model)?;
        Ok(Self::from_values(&zetas, bins))
    }

    pub fn from_values(values: &[f32], bins: usize) -> Self {
        let bins = bins.max(1);
        let mut histogram = vec![0usize; bins];
        for &v in values {
            let bin = ((v.clamp(0.0, 1.0) * bins as f32) as usize).min(bins - 1);
            histogram[bin] += 1;
        }
        let (min, max) = values
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let mean = if values.is_empty() {
            0.0
        } else {
            (values.iter().map(|&v| f64::from(v)).sum::<f64>() / values.len() as f64) as f32
        };
        Self {
            total: values.len(),
            exactly_zeros: values.iter().filter(|&&v| v == 0.0).count(),
            exactly_ones: values.iter().filter(|&&v| v == 1.0).count(),
            min: if values.is_empty() { 0.0 } else { min },
            max: if values.is_empty() { 0.0 } else { max },
            mean,
            histogram,
        }
    }

    /// Share of gates that are exactly 0 or 1.
    pub fn crisp_fraction(&self) -> f64 {
        super::metrics::fraction(self.exactly_zeros + self.exactly_ones, self.total)
    }
}

impl fmt::Display for GateStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "gates: {}  exact 0: {}  exact 1: {}  min {:.4}  max {:.4}  mean {:.4}",
            self.total, self.exactly_zeros, self.exactly_ones, self.min, self.max, self.mean
        )?;
        let bins = self.histogram.len();
        let peak = self.histogram.iter().copied().max().unwrap_or(0).max(1);
        for (i, &count) in self.histogram.iter().enumerate() {
            let lo = i as f32 / bins as f32;
            let hi = (i + 1) as f32 / bins as f32;
            let bar = "#".repeat(count * 40 / peak);
            writeln!(f, "  [{lo:.2}, {hi:.2}) {count:>6} {bar}")?;
        }
        Ok(())
    }
}

/// Full and kept gate counts of one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSummary {
    pub name: String,
    pub full: usize,
    pub kept: usize,
    pub is_imp: bool,
}

/// Per-block width before and after pruning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchitectureSummary {
    pub layers: Vec<LayerSummary>,
}

impl ArchitectureSummary {
    pub fn collect<M: GatedModel>(model: &M) -> Self {
        let layers = model
            .named_blocks()
            .map(|(name, block)| LayerSummary {
                name: name.to_string(),
                full: block.num_gates(),
                kept: kept_gates(block),
                is_imp: block.is_imp(),
            })
            .collect();
        Self { layers }
    }

    pub fn total_full(&self) -> usize {
        self.layers.iter().map(|l| l.full).sum()
    }

    pub fn total_kept(&self) -> usize {
        self.layers.iter().map(|l| l.kept).sum()
    }
}

impl fmt::Display for ArchitectureSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .layers
            .iter()
            .map(|l| l.name.len())
            .max()
            .unwrap_or(0)
            .max(5);
        writeln!(f, "{:<width$} {:>6} {:>6}", "layer", "full", "kept")?;
        for layer in &self.layers {
            let marker = if layer.is_imp { " *" } else { "" };
            writeln!(
                f,
                "{:<width$} {:>6} {:>6}{marker}",
                layer.name, layer.full, layer.kept
            )?;
        }
        writeln!(
            f,
            "{:<width$} {:>6} {:>6}",
            "total",
            self.total_full(),
            self.total_kept()
        )
    }
}
