//! Tests for gate snapshots.

use super::*;
use crate::prune::{GatePruner, PruneMode};
use approx::assert_abs_diff_eq;
use tempfile::TempDir;

fn two_block_registry() -> GateRegistry {
    let mut registry = GateRegistry::new();
    registry
        .register("layer1.0.bn1", PrunableNorm::from_zeta(vec![-2.0, 0.5, 3.0]))
        .unwrap();
    registry
        .register(
            "layer1.0.bn2",
            PrunableNorm::from_zeta(vec![1.0, -1.0]).with_importance(true),
        )
        .unwrap();
    registry.chain_names(&["layer1.0.bn1", "layer1.0.bn2"]).unwrap();
    registry
}

#[test]
fn test_yaml_round_trip_preserves_masks_and_chains() {
    // TEST_ID: SNP-001
    let mut registry = two_block_registry();
    GatePruner::default()
        .apply_prune(&mut registry, 0.5, PruneMode::Search, Some(0.8))
        .unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gates.yaml");
    let snapshot = GateSnapshot::from_registry(&registry);
    snapshot.save(&path).unwrap();

    let loaded = GateSnapshot::load(&path).unwrap();
    assert_eq!(loaded, snapshot, "SNP-001 FALSIFIED: YAML round trip changed snapshot");
    assert_eq!(loaded.chains, vec![vec!["layer1.0.bn1", "layer1.0.bn2"]]);

    let restored = loaded.into_registry().unwrap();
    for ((_, a), (_, b)) in registry.named_blocks().zip(restored.named_blocks()) {
        assert_eq!(a, b);
    }
    assert_eq!(restored.chains().len(), 1);
}

#[test]
fn test_json_selected_by_extension() {
    // TEST_ID: SNP-002
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gates.json");
    GateSnapshot::from_registry(&two_block_registry())
        .save(&path)
        .unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.trim_start().starts_with('{'));
    let loaded = GateSnapshot::load(&path).unwrap();
    assert_eq!(loaded.blocks.len(), 2);
    assert!(loaded.blocks.iter().all(|b| b.mask.is_none()));
}

#[test]
fn test_yaml_defaults_fill_missing_fields() {
    // TEST_ID: SNP-003
    let yaml = r#"
blocks:
  - name: conv1.bn
    zeta: [0.0, 0.0]
"#;
    let snapshot: GateSnapshot = serde_yaml::from_str(yaml).unwrap();
    let block = &snapshot.blocks[0];
    assert!(!block.is_imp);
    assert_abs_diff_eq!(block.beta, DEFAULT_BETA);
    assert_abs_diff_eq!(block.gamma, DEFAULT_GAMMA);
    assert!(snapshot.chains.is_empty());

    let registry = snapshot.into_registry().unwrap();
    assert_abs_diff_eq!(registry.by_name("conv1.bn").unwrap().zeta_i()[0], 0.5);
}

#[test]
fn test_non_binary_mask_rejected() {
    // TEST_ID: SNP-004
    let snapshot = GateSnapshot {
        blocks: vec![BlockSnapshot {
            name: "bn".to_string(),
            zeta: vec![0.1, 0.2],
            is_imp: false,
            beta: 1.0,
            gamma: 2.0,
            mask: Some(vec![1.0, 0.5]),
        }],
        chains: Vec::new(),
    };
    assert!(matches!(
        snapshot.into_registry(),
        Err(Error::InvalidMask { .. })
    ));
}

#[test]
fn test_mask_length_mismatch_rejected() {
    // TEST_ID: SNP-005
    let snapshot = GateSnapshot {
        blocks: vec![BlockSnapshot {
            name: "bn".to_string(),
            zeta: vec![0.1, 0.2],
            is_imp: false,
            beta: 1.0,
            gamma: 2.0,
            mask: Some(vec![1.0]),
        }],
        chains: Vec::new(),
    };
    let err = snapshot.into_registry().unwrap_err();
    assert!(matches!(
        err,
        Error::GateShapeMismatch { ref block, expected: 2, got: 1 } if block == "bn"
    ));
}

#[test]
fn test_unknown_chain_member_rejected() {
    // TEST_ID: SNP-006
    let mut snapshot = GateSnapshot::from_registry(&two_block_registry());
    snapshot.chains = vec![vec!["layer1.0.bn1".to_string(), "missing".to_string()]];
    assert!(matches!(
        snapshot.into_registry(),
        Err(Error::UnknownBlock { ref name }) if name == "missing"
    ));
}

#[test]
fn test_missing_file_is_io_error() {
    // TEST_ID: SNP-007
    let dir = TempDir::new().unwrap();
    let err = GateSnapshot::load(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert!(err.to_string().contains("absent.yaml"));
}

#[test]
fn test_malformed_yaml_is_serialization_error() {
    // TEST_ID: SNP-008
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.yaml");
    std::fs::write(&path, "blocks: [name: {").unwrap();
    assert!(matches!(
        GateSnapshot::load(&path),
        Err(Error::Serialization(_))
    ));
}
