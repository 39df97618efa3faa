//! Error types for gate pruning.
//!
//! Configuration mistakes and broken preconditions stop the operation and are
//! returned here. Structural findings such as a collapsed layer are not errors;
//! they come back as [`crate::prune::Diagnosis`] values.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the registry, the pruning engine and the snapshot loader.
#[derive(Debug, Error)]
pub enum Error {
    /// A budget or target fraction outside `[0, 1]`.
    #[error("Invalid budget {value}: target fraction must be between 0.0 and 1.0")]
    InvalidBudget { value: f64 },

    /// The fine-tuning loop ran the threshold below every gate without meeting the budget.
    #[error(
        "Threshold underflow: threshold {threshold} fell below floor {floor} \
         with remaining fraction {remaining} < budget {budget}"
    )]
    ThresholdUnderflow {
        threshold: f32,
        floor: f32,
        remaining: f64,
        budget: f64,
    },

    /// Threshold computation on a model without any gates.
    #[error("No gates registered: cannot compute a pruning threshold")]
    NoGates,

    /// `zeta_t` and `zeta_i` (or a mask) disagree on the number of gates.
    #[error("Gate shape mismatch in block '{block}': expected {expected} gates, got {got}")]
    GateShapeMismatch {
        block: String,
        expected: usize,
        got: usize,
    },

    /// A mask entry other than exactly 0 or 1.
    #[error("Invalid gate mask: {reason}")]
    InvalidMask { reason: String },

    /// NaN or infinite gate values.
    #[error("Numerical instability in block '{block}': {details}")]
    NumericalInstability { block: String, details: String },

    /// Two blocks registered under the same name.
    #[error("Duplicate block name '{name}'")]
    DuplicateBlock { name: String },

    /// A block id or name that is not registered.
    #[error("Unknown block '{name}'")]
    UnknownBlock { name: String },

    /// Invalid pruner configuration value.
    #[error("Invalid pruner configuration: {0}")]
    InvalidConfig(String),

    /// A prune spec file that failed validation.
    #[error("Invalid prune spec: {0}")]
    Spec(#[from] crate::config::SpecError),

    /// Gate update attempted while the block is frozen by pruning.
    #[error("Block '{block}' is pruned: gates are frozen until unprune")]
    FrozenGates { block: String },

    /// Filesystem failure with context.
    #[error("IO error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// YAML or JSON (de)serialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
