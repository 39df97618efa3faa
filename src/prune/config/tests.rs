//! Tests for pruner configuration module.

use super::*;

#[test]
fn test_config_default_values() {
    // TEST_ID: CFG-001
    let config = PrunerConfig::default();
    assert!((config.max_threshold() - 0.9).abs() < 1e-6);
    assert!((config.threshold_step() - 0.0001).abs() < 1e-9);
    assert!((config.steepness() - 20.0).abs() < 1e-6);
    assert!(config.validate().is_ok(), "CFG-001 FALSIFIED: defaults must validate");
}

#[test]
fn test_config_builder_pattern() {
    // TEST_ID: CFG-002
    let config = PrunerConfig::new()
        .with_max_threshold(0.75)
        .with_threshold_step(0.01)
        .with_steepness(50.0);
    assert!((config.max_threshold() - 0.75).abs() < 1e-6);
    assert!((config.threshold_step() - 0.01).abs() < 1e-9);
    assert!((config.steepness() - 50.0).abs() < 1e-6);
}

#[test]
fn test_config_rejects_non_positive_step() {
    // TEST_ID: CFG-003
    for step in [0.0, -0.001, f32::NAN, 1.0] {
        let config = PrunerConfig::new().with_threshold_step(step);
        assert!(
            config.validate().is_err(),
            "CFG-003 FALSIFIED: step {step} should be rejected"
        );
    }
}

#[test]
fn test_config_rejects_bad_cap_and_steepness() {
    // TEST_ID: CFG-004
    assert!(PrunerConfig::new().with_max_threshold(0.0).validate().is_err());
    assert!(PrunerConfig::new().with_max_threshold(f32::INFINITY).validate().is_err());
    let err = PrunerConfig::new().with_steepness(-1.0).validate().unwrap_err();
    assert!(err.contains("steepness"));
}

#[test]
fn test_config_yaml_fills_missing_fields_with_defaults() {
    // TEST_ID: CFG-005
    let config: PrunerConfig = serde_yaml::from_str("max_threshold: 0.8\n").unwrap();
    assert!((config.max_threshold() - 0.8).abs() < 1e-6);
    assert!((config.threshold_step() - DEFAULT_THRESHOLD_STEP).abs() < 1e-9);
    assert!((config.steepness() - DEFAULT_STEEPNESS).abs() < 1e-6);
}
