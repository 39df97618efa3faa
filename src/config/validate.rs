//! Prune spec validation

use super::schema::PruneSpec;
use crate::device::ComputeDevice;

/// Validation error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpecError {
    #[error("Gate snapshot does not exist: {0}")]
    GatesNotFound(String),

    #[error("Invalid budget: {0} (must be in [0.0, 1.0])")]
    InvalidBudget(f64),

    #[error("Invalid beta: {0} (must be > 0.0)")]
    InvalidBeta(f32),

    #[error("Invalid gamma: {0} (must be > 0.0)")]
    InvalidGamma(f32),

    #[error("Invalid device: {0}")]
    InvalidDevice(String),

    #[error("Invalid histogram bins: {0} (must be > 0)")]
    InvalidHistogramBins(usize),

    #[error("Invalid pruner section: {0}")]
    InvalidPruner(String),
}

/// Validate a prune specification
///
/// Checks numeric ranges, the device string and the pruner section. The
/// gate snapshot path is checked by the loader once it is resolved.
pub fn validate_spec(spec: &PruneSpec) -> Result<(), SpecError> {
    if !(0.0..=1.0).contains(&spec.budget) {
        return Err(SpecError::InvalidBudget(spec.budget));
    }

    if !(spec.beta.is_finite() && spec.beta > 0.0) {
        return Err(SpecError::InvalidBeta(spec.beta));
    }

    if !(spec.gamma.is_finite() && spec.gamma > 0.0) {
        return Err(SpecError::InvalidGamma(spec.gamma));
    }

    parse_device(&spec.device)?;

    if spec.histogram_bins == 0 {
        return Err(SpecError::InvalidHistogramBins(spec.histogram_bins));
    }

    spec.pruner.validate().map_err(SpecError::InvalidPruner)?;

    Ok(())
}

/// Parse the `device` field.
pub fn parse_device(device: &str) -> Result<ComputeDevice, SpecError> {
    device.parse().map_err(SpecError::InvalidDevice)
}
