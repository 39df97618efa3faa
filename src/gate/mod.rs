//! Gate-bearing blocks.
//!
//! [`PrunableBlock`] is the capability the pruning engine consumes. Any
//! normalization layer that owns a vector of gates can implement it;
//! [`PrunableNorm`] is the continuous-Heaviside reference implementation.

mod block;
mod mask;
mod norm;

#[cfg(test)]
mod tests;

pub use block::{GateState, PrunableBlock};
pub use mask::GateMask;
pub use norm::{PrunableNorm, DEFAULT_BETA, DEFAULT_GAMMA};
