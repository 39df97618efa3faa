//! Pruner configuration module
//!
//! Tunable constants of the threshold search: the single-shot threshold cap,
//! the fine-tuning decrement and the smooth-round steepness.

mod pruner_config;

#[cfg(test)]
mod tests;

pub use pruner_config::{
    PrunerConfig, DEFAULT_MAX_THRESHOLD, DEFAULT_STEEPNESS, DEFAULT_THRESHOLD_STEP,
};
