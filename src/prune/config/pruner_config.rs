//! Main pruner configuration struct.

use serde::{Deserialize, Serialize};

/// Highest threshold a single quantile-driven prune may use.
pub const DEFAULT_MAX_THRESHOLD: f32 = 0.9;

/// Amount the fine-tuning loop lowers the threshold per retry.
pub const DEFAULT_THRESHOLD_STEP: f32 = 0.0001;

/// Steepness of the sigmoid used to count active gates smoothly.
pub const DEFAULT_STEEPNESS: f32 = 20.0;

/// Configuration for the gate pruner.
///
/// # Example
///
/// ```
/// use podar::prune::PrunerConfig;
///
/// let config = PrunerConfig::default()
///     .with_max_threshold(0.8)
///     .with_threshold_step(0.001);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrunerConfig {
    /// Cap applied to a computed (not explicit) threshold.
    max_threshold: f32,

    /// Decrement of the fine-tuning convergence loop.
    threshold_step: f32,

    /// Sigmoid steepness for the remaining-fraction estimate.
    steepness: f32,
}

impl Default for PrunerConfig {
    fn default() -> Self {
        Self {
            max_threshold: DEFAULT_MAX_THRESHOLD,
            threshold_step: DEFAULT_THRESHOLD_STEP,
            steepness: DEFAULT_STEEPNESS,
        }
    }
}

impl PrunerConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the single-shot threshold cap.
    pub fn with_max_threshold(mut self, max_threshold: f32) -> Self {
        self.max_threshold = max_threshold;
        self
    }

    /// Set the fine-tuning threshold decrement.
    pub fn with_threshold_step(mut self, step: f32) -> Self {
        self.threshold_step = step;
        self
    }

    /// Set the smooth-round steepness.
    pub fn with_steepness(mut self, steepness: f32) -> Self {
        self.steepness = steepness;
        self
    }

    pub fn max_threshold(&self) -> f32 {
        self.max_threshold
    }

    pub fn threshold_step(&self) -> f32 {
        self.threshold_step
    }

    pub fn steepness(&self) -> f32 {
        self.steepness
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.max_threshold.is_finite() || self.max_threshold <= 0.0 {
            return Err(format!(
                "max_threshold ({}) must be a positive finite value",
                self.max_threshold
            ));
        }
        if !self.threshold_step.is_finite() || self.threshold_step <= 0.0 {
            return Err(format!(
                "threshold_step ({}) must be greater than 0.0",
                self.threshold_step
            ));
        }
        if self.threshold_step >= 1.0 {
            return Err(format!(
                "threshold_step ({}) must be less than 1.0",
                self.threshold_step
            ));
        }
        if !self.steepness.is_finite() || self.steepness <= 0.0 {
            return Err(format!(
                "steepness ({}) must be greater than 0.0",
                self.steepness
            ));
        }
        Ok(())
    }
}
