//! Selector properties and convergence scenarios.

use proptest::prelude::*;
use std::collections::BTreeMap;

use ecole::{ArmState, BanditArmSelector};

fn pool(arms: &[(String, f64, u64)]) -> BTreeMap<String, ArmState> {
    arms.iter()
        .map(|(id, sum, n)| (id.clone(), ArmState::new(*sum, *n)))
        .collect()
}

proptest! {
    #[test]
    fn prop_select_returns_member_of_pool(
        arms in prop::collection::vec(("[a-z]{1,8}", -100.0..100.0f64, 0u64..1000), 1..12),
        exploration in 0.0..=1.0f64,
        seed in any::<u64>(),
    ) {
        let pool = pool(&arms);
        let selector = BanditArmSelector::with_seed(seed);
        let chosen = selector.select(&pool, exploration).unwrap();
        prop_assert!(pool.contains_key(&chosen));
    }

    #[test]
    fn prop_update_folds_reward_into_mean(
        sum in -50.0..50.0f64,
        n in 0u64..500,
        reward in -1.0..1.0f64,
    ) {
        let mut arms = BTreeMap::from([("a".to_string(), ArmState::new(sum, n))]);
        let old_mean = arms["a"].mean();

        BanditArmSelector::update(&mut arms, "a", reward);

        let arm = arms["a"];
        prop_assert_eq!(arm.n, n + 1);
        let expected = (old_mean * n as f64 + reward) / (n + 1) as f64;
        prop_assert!((arm.mean() - expected).abs() < 1e-9);
    }

    #[test]
    fn prop_propensity_is_a_probability(
        arms in prop::collection::vec(("[a-z]{1,8}", -10.0..10.0f64, 0u64..50), 1..6),
        exploration in 0.0..=1.0f64,
    ) {
        let pool = pool(&arms);
        let selection = BanditArmSelector::with_seed(9)
            .select_with_propensity(&pool, exploration, 64)
            .unwrap();
        prop_assert!(selection.propensity > 0.0 || exploration < 1.0);
        prop_assert!(selection.propensity <= 1.0 + 1e-12);
    }
}

#[test]
fn test_rewarded_arm_dominates_after_thirty_rounds() {
    let mut arms = BTreeMap::from([
        ("A".to_string(), ArmState::default()),
        ("B".to_string(), ArmState::default()),
    ]);
    for _ in 0..30 {
        BanditArmSelector::update(&mut arms, "A", 1.0);
        BanditArmSelector::update(&mut arms, "B", 0.0);
    }

    for seed in 0..10 {
        let selector = BanditArmSelector::with_seed(seed);
        let wins = (0..20)
            .filter(|_| selector.select(&arms, 0.0).unwrap() == "A")
            .count();
        assert!(wins >= 15, "seed {seed}: A chosen {wins}/20");
    }
}
