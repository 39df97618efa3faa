//! Structural diagnosis after a prune pass.

use crate::gate::PrunableBlock;
use crate::registry::GatedModel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural finding reported by [`diagnose`].
///
/// A diagnosis is returned as data; the caller decides whether to remove
/// orphans, retry with another budget or abort the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Diagnosis {
    /// An important block has every gate pruned.
    Broken,
    /// This many units are dead but not yet excised.
    Removable(usize),
    /// Both of the above.
    BrokenAndRemovable(usize),
}

impl Diagnosis {
    pub fn is_broken(&self) -> bool {
        matches!(self, Diagnosis::Broken | Diagnosis::BrokenAndRemovable(_))
    }

    /// Removable unit count, zero when none.
    pub fn removable(&self) -> usize {
        match self {
            Diagnosis::Broken => 0,
            Diagnosis::Removable(n) | Diagnosis::BrokenAndRemovable(n) => *n,
        }
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnosis::Broken => write!(f, "broken"),
            Diagnosis::Removable(n) => write!(f, "removable_{n}"),
            Diagnosis::BrokenAndRemovable(n) => write!(f, "both rem_{n} and broken"),
        }
    }
}

/// True when some important block is pruned to all zeros.
pub fn is_broken<M: GatedModel>(model: &M) -> bool {
    model
        .blocks()
        .any(|block| block.is_imp() && block.state().is_fully_zeroed())
}

/// Combine breakage and the model's removable-orphan count.
pub fn diagnose<M: GatedModel>(model: &M) -> Option<Diagnosis> {
    let removable = model.removable_orphans();
    match (is_broken(model), removable) {
        (true, 0) => Some(Diagnosis::Broken),
        (true, n) => Some(Diagnosis::BrokenAndRemovable(n)),
        (false, 0) => None,
        (false, n) => Some(Diagnosis::Removable(n)),
    }
}
