//! Property-based tests for the threshold solver and the fine-tuning loop.

use super::*;
use crate::device::ComputeDevice;
use crate::gate::PrunableBlock;
use crate::registry::GatedModel;
use crate::test_support::{registry_of, uniform_gates, FixedGates};
use proptest::prelude::*;

proptest! {
    /// Rank always indexes into the sorted gates
    #[test]
    fn rank_in_bounds(n in 1usize..5000, fraction in 0.0f64..=1.0) {
        let rank = quantile_rank(n, fraction);
        prop_assert!(rank < n);
    }

    /// Larger keep fractions never raise the threshold
    #[test]
    fn threshold_monotone_in_fraction(
        values in prop::collection::vec(0.0f32..1.0, 1..200),
        a in 0.0f64..=1.0,
        b in 0.0f64..=1.0,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let t_lo = quantile_threshold(&values, lo).unwrap();
        let t_hi = quantile_threshold(&values, hi).unwrap();
        prop_assert!(t_hi <= t_lo);
    }

    /// The threshold is one of the gate values
    #[test]
    fn threshold_is_a_gate(
        values in prop::collection::vec(0.0f32..1.0, 1..200),
        fraction in 0.0f64..=1.0,
    ) {
        let t = quantile_threshold(&values, fraction).unwrap();
        prop_assert!(values.contains(&t));
    }

    /// Computed thresholds never exceed the cap
    #[test]
    fn computed_threshold_capped(
        values in prop::collection::vec(0.0f32..1.0, 1..100),
        fraction in 0.0f64..=1.0,
    ) {
        let mut model = registry_of(vec![FixedGates::new(&values)]);
        let outcome = GatePruner::default()
            .apply_prune(&mut model, fraction, PruneMode::Search, None)
            .unwrap();
        prop_assert!(outcome.threshold <= DEFAULT_MAX_THRESHOLD);
    }

    /// Prune then revert leaves every block active with the same gates
    /// and the same remaining fraction
    #[test]
    fn prune_revert_round_trip(
        values in prop::collection::vec(0.0f32..1.0, 1..100),
        fraction in 0.0f64..=1.0,
    ) {
        let mut model = registry_of(vec![FixedGates::new(&values)]);
        let mut pruner = GatePruner::default();
        let before = pruner.remaining_fraction(&model);
        pruner.apply_prune(&mut model, fraction, PruneMode::Finetune, None).unwrap();
        pruner.revert_prune(&mut model);
        prop_assert!(model.blocks().all(|b| !b.is_pruned()));
        prop_assert!((pruner.remaining_fraction(&model) - before).abs() < 1e-12);
        let after: Vec<f32> = pruner.collect_zetas(&model).unwrap();
        prop_assert_eq!(after, values);
    }

    /// The loop meets any budget on evenly spread gates
    #[test]
    fn finetune_meets_budget(
        n in 1usize..300,
        budget in 0.0f64..=1.0,
    ) {
        let mut model = registry_of(vec![FixedGates::new(&uniform_gates(n))]);
        let outcome = GatePruner::default()
            .prepare_for_finetuning(&mut model, 1.0, 2.0, ComputeDevice::Cpu, budget)
            .unwrap();
        prop_assert!(outcome.remaining >= budget);
        prop_assert!(model.blocks().all(PrunableBlock::is_pruned));
    }
}
