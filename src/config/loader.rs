//! Prune spec loading

use super::schema::PruneSpec;
use super::validate::{validate_spec, SpecError};
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Load a prune spec from a YAML file and validate it.
///
/// A relative `gates` path is resolved against the directory holding the
/// spec, and must exist.
pub fn load_spec<P: AsRef<Path>>(spec_path: P) -> Result<PruneSpec> {
    let spec_path = spec_path.as_ref();
    let yaml_content = fs::read_to_string(spec_path)
        .map_err(|e| Error::io(format!("reading spec {}", spec_path.display()), e))?;

    let mut spec = parse_spec(&yaml_content)?;

    if spec.gates.is_relative() {
        if let Some(dir) = spec_path.parent() {
            spec.gates = dir.join(&spec.gates);
        }
    }
    if !spec.gates.exists() {
        return Err(SpecError::GatesNotFound(spec.gates.display().to_string()).into());
    }

    Ok(spec)
}

/// Parse and validate spec YAML without touching the filesystem.
pub fn parse_spec(yaml: &str) -> Result<PruneSpec> {
    let spec: PruneSpec = serde_yaml::from_str(yaml)
        .map_err(|e| Error::Serialization(format!("Failed to parse YAML spec: {e}")))?;
    validate_spec(&spec)?;
    Ok(spec)
}
