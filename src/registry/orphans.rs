//! Orphan detection and removal over registered blocks.
//!
//! An orphan candidate is a non-important block whose gates were all pruned
//! to zero. Removing it also zeroes the non-important blocks chained to it,
//! because their channels only feed the dead unit.

use super::{BlockId, RegisteredBlock};
use crate::gate::{GateMask, PrunableBlock};
use tracing::debug;

fn is_candidate<B: PrunableBlock>(entry: &RegisteredBlock<B>) -> bool {
    !entry.excised && !entry.block.is_imp() && entry.block.state().is_fully_zeroed()
}

pub(super) fn count_removable<B: PrunableBlock>(entries: &[RegisteredBlock<B>]) -> usize {
    entries.iter().filter(|entry| is_candidate(entry)).count()
}

pub(super) fn remove<B: PrunableBlock>(
    entries: &mut [RegisteredBlock<B>],
    chains: &[Vec<BlockId>],
) -> usize {
    for entry in entries.iter_mut().filter(|entry| is_candidate(entry)) {
        entry.excised = true;
    }

    let mut removed = 0;
    let mut changed = true;
    while changed {
        changed = false;
        for chain in chains {
            if !chain.iter().any(|id| entries[id.0].excised) {
                continue;
            }
            for id in chain {
                let entry = &mut entries[id.0];
                if entry.excised || entry.block.is_imp() {
                    continue;
                }
                let kept = entry
                    .block
                    .pruned_zeta()
                    .map_or(entry.block.num_gates(), GateMask::kept);
                entry.block.zero_gates();
                entry.excised = true;
                removed += kept;
                changed = true;
                debug!(block = %entry.name, gates = kept, "orphaned block zeroed");
            }
        }
    }
    removed
}
