//! Explicit registry of the prunable blocks inside a model.
//!
//! Blocks are registered once, at model construction, in a fixed order. That
//! order is the traversal order for every gate-wide operation, so threshold
//! computation is reproducible across runs.

mod orphans;


use crate::error::{Error, Result};
use crate::gate::{PrunableBlock, PrunableNorm};

/// Model-level capability consumed by the pruning engine.
///
/// Traversal must visit every block exactly once, in a stable order.
pub trait GatedModel {
    type Block: PrunableBlock;

    /// Blocks with their names, in traversal order.
    fn named_blocks(&self) -> impl Iterator<Item = (&str, &Self::Block)>;

    /// Mutable blocks, in the same order as [`GatedModel::named_blocks`].
    fn blocks_mut(&mut self) -> impl Iterator<Item = &mut Self::Block>;

    /// Excise dead structure left behind by the last prune.
    /// Returns the number of gates newly removed.
    fn remove_orphans(&mut self) -> usize;

    /// Number of units that [`GatedModel::remove_orphans`] would excise.
    fn removable_orphans(&self) -> usize;

    /// Forget orphan exclusions from an earlier prune pass.
    fn reset_orphans(&mut self) {}

    fn blocks(&self) -> impl Iterator<Item = &Self::Block> {
        self.named_blocks().map(|(_, block)| block)
    }

    fn total_gates(&self) -> usize {
        self.blocks().map(PrunableBlock::num_gates).sum()
    }
}

/// Handle returned by [`GateRegistry::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(usize);

impl BlockId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One registered block and its model-level bookkeeping.
#[derive(Debug, Clone)]
pub struct RegisteredBlock<B> {
    name: String,
    block: B,
    excised: bool,
}

impl<B> RegisteredBlock<B> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn block(&self) -> &B {
        &self.block
    }

    pub fn block_mut(&mut self) -> &mut B {
        &mut self.block
    }

    /// Excised by orphan removal since the last prune pass.
    pub fn is_excised(&self) -> bool {
        self.excised
    }
}

/// Ordered, owned collection of prunable blocks.
///
/// Chains record blocks that are serially coupled, such as the two
/// normalizations of one residual branch: once one of them is fully zeroed
/// the others only feed dead structure.
#[derive(Debug, Clone)]
pub struct GateRegistry<B = PrunableNorm> {
    entries: Vec<RegisteredBlock<B>>,
    chains: Vec<Vec<BlockId>>,
}

impl<B> Default for GateRegistry<B> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            chains: Vec::new(),
        }
    }
}

impl<B: PrunableBlock> GateRegistry<B> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a block under a unique name.
    ///
    /// Fails when the name is taken or the block's `zeta_t`/`zeta_i` do not
    /// both have `num_gates` entries.
    pub fn register(&mut self, name: impl Into<String>, block: B) -> Result<BlockId> {
        let name = name.into();
        if self.id_of(&name).is_some() {
            return Err(Error::DuplicateBlock { name });
        }
        let expected = block.num_gates();
        for got in [block.zeta_t().len(), block.zeta_i().len()] {
            if got != expected {
                return Err(Error::GateShapeMismatch {
                    block: name,
                    expected,
                    got,
                });
            }
        }
        let id = BlockId(self.entries.len());
        self.entries.push(RegisteredBlock {
            name,
            block,
            excised: false,
        });
        Ok(id)
    }

    /// Declare a chain of serially coupled blocks.
    pub fn chain(&mut self, ids: &[BlockId]) -> Result<()> {
        if let Some(bad) = ids.iter().find(|id| id.0 >= self.entries.len()) {
            return Err(Error::UnknownBlock {
                name: format!("#{}", bad.0),
            });
        }
        if ids.len() > 1 {
            self.chains.push(ids.to_vec());
        }
        Ok(())
    }

    /// Declare a chain by block names.
    pub fn chain_names<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        let ids = names
            .iter()
            .map(|name| {
                self.id_of(name.as_ref()).ok_or_else(|| Error::UnknownBlock {
                    name: name.as_ref().to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        self.chain(&ids)
    }

    pub fn id_of(&self, name: &str) -> Option<BlockId> {
        self.entries
            .iter()
            .position(|entry| entry.name == name)
            .map(BlockId)
    }

    pub fn get(&self, id: BlockId) -> Option<&B> {
        self.entries.get(id.0).map(|entry| &entry.block)
    }

    pub fn get_mut(&mut self, id: BlockId) -> Option<&mut B> {
        self.entries.get_mut(id.0).map(|entry| &mut entry.block)
    }

    pub fn by_name(&self, name: &str) -> Option<&B> {
        self.id_of(name).and_then(|id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RegisteredBlock<B>] {
        &self.entries
    }

    pub fn chains(&self) -> &[Vec<BlockId>] {
        &self.chains
    }
}

impl<B: PrunableBlock> GatedModel for GateRegistry<B> {
    type Block = B;

    fn named_blocks(&self) -> impl Iterator<Item = (&str, &B)> {
        self.entries
            .iter()
            .map(|entry| (entry.name.as_str(), &entry.block))
    }

    fn blocks_mut(&mut self) -> impl Iterator<Item = &mut B> {
        self.entries.iter_mut().map(|entry| &mut entry.block)
    }

    fn remove_orphans(&mut self) -> usize {
        orphans::remove(&mut self.entries, &self.chains)
    }

    fn removable_orphans(&self) -> usize {
        orphans::count_removable(&self.entries)
    }

    fn reset_orphans(&mut self) {
        for entry in &mut self.entries {
            entry.excised = false;
        }
    }
}
