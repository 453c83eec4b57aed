//! Arm selection via Thompson-style sampling with epsilon exploration.
//!
//! ## Design
//!
//! Each arm's value is modelled as a normal distribution centred on its mean
//! reward with standard deviation `1/sqrt(n+1)`, so arms with few settled
//! attempts are sampled with wide spread and keep getting picked now and then
//! even outside the epsilon branch.
//!
//! The flow is:
//! 1. With probability `exploration`, pick a uniformly random arm.
//! 2. Otherwise draw one sample per arm and pick the largest.
//! 3. Settled rewards are folded back with [`BanditArmSelector::update`]
//!    (in memory) or the play repository's atomic `record_reward`.
//!
//! The random source is owned by the selector instance and can be seeded,
//! so tests are reproducible and never share state.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{ArmState, BanditConfig};

/// Chosen arm together with its estimated selection probability.
#[derive(Debug, Clone, PartialEq)]
pub struct ArmSelection {
    pub arm_id: String,
    pub propensity: f64,
}

/// Seedable arm selector.
pub struct BanditArmSelector {
    rng: Mutex<StdRng>,
}

impl BanditArmSelector {
    /// Create a selector seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create a selector with a fixed seed (reproducible).
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_config(config: &BanditConfig) -> Self {
        config.seed.map_or_else(Self::new, Self::with_seed)
    }

    /// Choose an arm id from a non-empty pool.
    ///
    /// Ties between bit-identical samples go to the first arm in id order.
    pub fn select(&self, arms: &BTreeMap<String, ArmState>, exploration: f64) -> DomainResult<String> {
        if arms.is_empty() {
            return Err(DomainError::NoArmsAvailable);
        }
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(pick(&mut rng, arms, exploration).to_string())
    }

    /// Choose an arm and estimate the probability this policy picks it.
    ///
    /// The propensity is `exploration/k + (1-exploration) * p_win`, where
    /// `p_win` is the share of `samples` independent sampling rounds the arm
    /// wins.
    pub fn select_with_propensity(
        &self,
        arms: &BTreeMap<String, ArmState>,
        exploration: f64,
        samples: u32,
    ) -> DomainResult<ArmSelection> {
        if arms.is_empty() {
            return Err(DomainError::NoArmsAvailable);
        }
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let arm_id = pick(&mut rng, arms, exploration).to_string();

        let rounds = samples.max(1);
        let wins = (0..rounds)
            .filter(|_| sample_argmax(&mut rng, arms) == arm_id.as_str())
            .count();
        let p_win = wins as f64 / f64::from(rounds);
        let propensity = exploration / arms.len() as f64 + (1.0 - exploration) * p_win;

        Ok(ArmSelection { arm_id, propensity })
    }

    /// Fold a reward into an in-memory pool. Unknown arms start from zero.
    pub fn update(arms: &mut BTreeMap<String, ArmState>, arm_id: &str, reward: f64) {
        arms.entry(arm_id.to_string()).or_default().record(reward);
    }
}

impl Default for BanditArmSelector {
    fn default() -> Self {
        Self::new()
    }
}

fn pick<'a>(rng: &mut StdRng, arms: &'a BTreeMap<String, ArmState>, exploration: f64) -> &'a str {
    if rng.gen::<f64>() < exploration {
        let index = rng.gen_range(0..arms.len());
        if let Some(arm_id) = arms.keys().nth(index) {
            return arm_id;
        }
    }
    sample_argmax(rng, arms)
}

fn sample_argmax<'a>(rng: &mut StdRng, arms: &'a BTreeMap<String, ArmState>) -> &'a str {
    let mut best: Option<&'a str> = None;
    let mut best_sample = f64::NEG_INFINITY;
    for (arm_id, state) in arms {
        let mean = state.mean();
        let sample = Normal::new(mean, state.sampling_std_dev()).map_or(mean, |dist| dist.sample(rng));
        if best.is_none() || sample > best_sample {
            best_sample = sample;
            best = Some(arm_id);
        }
    }
    best.unwrap_or_default()
}
