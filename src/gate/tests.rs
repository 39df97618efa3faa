//! Tests for the reference gated normalization block.

use super::*;
use approx::assert_abs_diff_eq;
use ndarray::{array, Array1};

fn crispness(block: &PrunableNorm) -> f32 {
    let diff = block.zeta_t() - block.zeta_i();
    diff.mapv(|d| d * d).mean().unwrap_or(0.0)
}

// =============================================================================
// Gate maps
// =============================================================================

#[test]
fn test_zero_raw_zeta_maps_to_half_anchor() {
    // TEST_ID: GATE-001
    let block = PrunableNorm::from_zeta(vec![0.0]);
    assert_abs_diff_eq!(block.zeta_i()[0], 0.5, epsilon = 1e-6);
    let expected = 1.0 - (-1.0f32).exp() + 0.5 * (-2.0f32).exp();
    assert_abs_diff_eq!(block.zeta_t()[0], expected, epsilon = 1e-6);
}

#[test]
fn test_gates_stay_in_unit_interval() {
    // TEST_ID: GATE-002
    let block = PrunableNorm::from_zeta(vec![-50.0, -1.0, 0.0, 1.0, 50.0]).with_beta_gamma(4.0, 8.0);
    for &v in block.zeta_t().iter().chain(block.zeta_i().iter()) {
        assert!(
            (-1e-6..=1.0 + 1e-6).contains(&v),
            "GATE-002 FALSIFIED: gate value {v} left [0, 1]"
        );
    }
}

#[test]
fn test_saturated_gates_are_crisp() {
    // TEST_ID: GATE-003
    // zeta_t == zeta_i at the saturation points 0 and 1
    let block = PrunableNorm::from_zeta(vec![-100.0, 100.0]);
    assert_abs_diff_eq!(crispness(&block), 0.0, epsilon = 1e-6);
}

#[test]
fn test_seeded_init_is_deterministic_and_small() {
    // TEST_ID: GATE-004
    let a = PrunableNorm::seeded(16, 7);
    let b = PrunableNorm::seeded(16, 7);
    assert_eq!(a, b, "GATE-004 FALSIFIED: same seed must give same gates");
    assert!(a.zeta().iter().all(|&z| (0.0..0.01).contains(&z)));
    assert_eq!(a.num_gates(), 16);
}

// =============================================================================
// Prune / unprune
// =============================================================================

#[test]
fn test_prune_freezes_mask_and_unprune_releases() {
    // TEST_ID: GATE-010
    let mut block = PrunableNorm::from_zeta(vec![-5.0, 0.0, 5.0]);
    let before = block.zeta_t();
    block.prune(block.zeta_t()[1]);

    let mask = block.pruned_zeta().expect("pruned block has a mask");
    assert_eq!(mask.as_slice(), &[false, true, true]);
    assert!(block.is_pruned());

    block.unprune();
    assert!(!block.is_pruned());
    assert!(block.pruned_zeta().is_none());
    assert_eq!(block.zeta_t(), before, "GATE-010 FALSIFIED: prune changed gate values");
}

#[test]
fn test_zero_gates_removes_everything() {
    // TEST_ID: GATE-011
    let mut block = PrunableNorm::seeded(4, 1);
    block.zero_gates();
    assert!(block.state().is_fully_zeroed());
    assert_eq!(block.channel_scales(), Array1::<f32>::zeros(4));
}

#[test]
fn test_freeze_rejects_wrong_width() {
    // TEST_ID: GATE-012
    let mut block = PrunableNorm::seeded(4, 1);
    assert!(block.freeze(GateMask::ones(3)).is_err());
    assert!(block.freeze(GateMask::ones(4)).is_ok());
    assert!(block.is_pruned());
}

#[test]
fn test_boxed_block_delegates() {
    // TEST_ID: GATE-013
    let mut boxed: Box<dyn PrunableBlock> = Box::new(PrunableNorm::from_zeta(vec![10.0, -10.0]));
    boxed.prune(0.5);
    assert_eq!(boxed.pruned_zeta().map(GateMask::kept), Some(1));
    boxed.set_beta_gamma(2.0, 3.0);
    boxed.unprune();
    assert!(!boxed.is_pruned());
}

// =============================================================================
// Forward scaling and gradients
// =============================================================================

#[test]
fn test_scale_channels_uses_mask_when_pruned() {
    // TEST_ID: GATE-020
    let mut block = PrunableNorm::from_zeta(vec![10.0, -10.0]);
    block.prune(0.5);
    let x = array![[2.0, 3.0], [4.0, 5.0]];
    let y = block.scale_channels(&x).unwrap();
    assert_eq!(y, array![[2.0, 0.0], [4.0, 0.0]]);

    let wrong = array![[1.0, 2.0, 3.0]];
    assert!(block.scale_channels(&wrong).is_err());
}

#[test]
fn test_backward_matches_finite_difference() {
    // TEST_ID: GATE-021
    let block = PrunableNorm::from_zeta(vec![0.3]).with_beta_gamma(1.5, 2.5);
    let grad = block
        .backward_zeta(&array![1.0], &array![0.0])
        .unwrap();

    let h = 1e-3;
    let up = PrunableNorm::from_zeta(vec![0.3 + h]).with_beta_gamma(1.5, 2.5);
    let down = PrunableNorm::from_zeta(vec![0.3 - h]).with_beta_gamma(1.5, 2.5);
    let numeric = (up.zeta_t()[0] - down.zeta_t()[0]) / (2.0 * h);
    assert_abs_diff_eq!(grad[0], numeric, epsilon = 1e-3);
}

#[test]
fn test_sgd_step_reduces_crispness() {
    // TEST_ID: GATE-022
    let mut block = PrunableNorm::from_zeta(vec![0.5, 1.0, -0.5, 2.0]);
    let before = crispness(&block);

    let n = block.num_gates() as f32;
    let diff = block.zeta_t() - block.zeta_i();
    let grad_t = diff.mapv(|d| 2.0 * d / n);
    let grad_i = grad_t.mapv(|g| -g);
    let grad = block.backward_zeta(&grad_t, &grad_i).unwrap();
    block.sgd_step(&grad, 0.5).unwrap();

    let after = crispness(&block);
    assert!(
        after < before,
        "GATE-022 FALSIFIED: crispness rose from {before} to {after}"
    );
}

#[test]
fn test_sgd_step_refused_while_pruned() {
    // TEST_ID: GATE-023
    let mut block = PrunableNorm::seeded(2, 3);
    block.prune(0.5);
    let err = block.sgd_step(&array![0.1, 0.1], 0.1).unwrap_err();
    assert!(err.to_string().contains("frozen"));
}
