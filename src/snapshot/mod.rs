//! Gate snapshots: a registry of [`PrunableNorm`] blocks on disk.
//!
//! The format follows the file extension: `.json` is JSON, anything else is
//! YAML. Masks are stored as 0/1 numbers so they stay readable in both.

#[cfg(test)]
mod tests;

use crate::error::{Error, Result};
use crate::gate::{GateMask, PrunableBlock, PrunableNorm, DEFAULT_BETA, DEFAULT_GAMMA};
use crate::registry::{GateRegistry, GatedModel};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_beta() -> f32 {
    DEFAULT_BETA
}

fn default_gamma() -> f32 {
    DEFAULT_GAMMA
}

/// One block as stored in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockSnapshot {
    pub name: String,
    /// Raw gate parameters.
    pub zeta: Vec<f32>,
    #[serde(default)]
    pub is_imp: bool,
    #[serde(default = "default_beta")]
    pub beta: f32,
    #[serde(default = "default_gamma")]
    pub gamma: f32,
    /// Frozen mask, present when the block is pruned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<Vec<f32>>,
}

/// Serializable description of a gated model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GateSnapshot {
    pub blocks: Vec<BlockSnapshot>,
    /// Serially coupled blocks, by name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chains: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Json,
}

impl Format {
    fn of(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        match ext.as_str() {
            "json" => Format::Json,
            _ => Format::Yaml,
        }
    }
}

impl GateSnapshot {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("reading snapshot {}", path.display()), e))?;
        Self::parse(&content, Format::of(path))
    }

    fn parse(content: &str, format: Format) -> Result<Self> {
        match format {
            Format::Json => serde_json::from_str(content)
                .map_err(|e| Error::Serialization(format!("invalid snapshot JSON: {e}"))),
            Format::Yaml => serde_yaml::from_str(content)
                .map_err(|e| Error::Serialization(format!("invalid snapshot YAML: {e}"))),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = match Format::of(path) {
            Format::Json => serde_json::to_string_pretty(self)
                .map_err(|e| Error::Serialization(e.to_string()))?,
            Format::Yaml => {
                serde_yaml::to_string(self).map_err(|e| Error::Serialization(e.to_string()))?
            }
        };
        std::fs::write(path, content)
            .map_err(|e| Error::io(format!("writing snapshot {}", path.display()), e))
    }

    /// Build the registry, restoring masks and chains.
    pub fn into_registry(self) -> Result<GateRegistry> {
        let mut registry = GateRegistry::new();
        for block in self.blocks {
            let mut norm = PrunableNorm::from_zeta(block.zeta)
                .with_importance(block.is_imp)
                .with_beta_gamma(block.beta, block.gamma);
            if let Some(values) = block.mask {
                let mask = GateMask::from_values(&values)?;
                if mask.len() != norm.num_gates() {
                    return Err(Error::GateShapeMismatch {
                        block: block.name,
                        expected: norm.num_gates(),
                        got: mask.len(),
                    });
                }
                norm.freeze(mask)?;
            }
            registry.register(block.name, norm)?;
        }
        for chain in &self.chains {
            registry.chain_names(chain)?;
        }
        Ok(registry)
    }

    /// Capture the registry's current gates, masks and chains.
    pub fn from_registry(registry: &GateRegistry) -> Self {
        let blocks = registry
            .named_blocks()
            .map(|(name, norm)| BlockSnapshot {
                name: name.to_string(),
                zeta: norm.zeta().to_vec(),
                is_imp: norm.is_imp(),
                beta: norm.beta(),
                gamma: norm.gamma(),
                mask: norm.pruned_zeta().map(|mask| mask.to_array().to_vec()),
            })
            .collect();
        let chains = registry
            .chains()
            .iter()
            .map(|chain| {
                chain
                    .iter()
                    .filter_map(|&id| registry.entries().get(id.index()))
                    .map(|entry| entry.name().to_string())
                    .collect()
            })
            .collect();
        Self { blocks, chains }
    }
}
