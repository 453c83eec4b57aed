//! Play (arm) domain model.
//!
//! A play is a selectable content strategy. Its [`ArmState`] holds the
//! cumulative reward statistics the bandit reads when choosing between plays.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Workstream;

/// Sufficient statistics for one arm.
///
/// Cumulative for the lifetime of the arm: never decremented or decayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ArmState {
    /// Sum of all settled rewards
    pub reward_sum: f64,
    /// Number of settled attempts that contributed to `reward_sum`
    pub n: u64,
}

impl ArmState {
    pub fn new(reward_sum: f64, n: u64) -> Self {
        Self { reward_sum, n }
    }

    /// Mean reward, or 0 for an arm that has never been rewarded.
    pub fn mean(&self) -> f64 {
        if self.n == 0 {
            0.0
        } else {
            self.reward_sum / self.n as f64
        }
    }

    /// Standard deviation of the sampling distribution: `1/sqrt(n+1)`.
    pub fn sampling_std_dev(&self) -> f64 {
        1.0 / ((self.n + 1) as f64).sqrt()
    }

    /// Fold one reward into the statistics.
    pub fn record(&mut self, reward: f64) {
        self.reward_sum += reward;
        self.n += 1;
    }
}

/// A selectable strategy for one workstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Play {
    pub id: String,
    pub workstream: Workstream,
    pub arm: ArmState,
    /// Inactive plays keep their history but are excluded from selection.
    pub active: bool,
    /// Free-form strategy parameters from the playbook
    pub params: BTreeMap<String, serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Play {
    pub fn new(id: impl Into<String>, workstream: Workstream) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            workstream,
            arm: ArmState::default(),
            active: true,
            params: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_arm(mut self, arm: ArmState) -> Self {
        self.arm = arm;
        self
    }

    pub fn with_params(mut self, params: BTreeMap<String, serde_json::Value>) -> Self {
        self.params = params;
        self
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_of_unsampled_arm_is_zero() {
        assert_eq!(ArmState::default().mean(), 0.0);
    }

    #[test]
    fn test_record_updates_mean_incrementally() {
        let mut arm = ArmState::new(3.0, 4);
        let old_mean = arm.mean();
        arm.record(2.0);
        assert_eq!(arm.n, 5);
        let expected = (old_mean * 4.0 + 2.0) / 5.0;
        assert!((arm.mean() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_std_dev_shrinks_with_samples() {
        assert!((ArmState::default().sampling_std_dev() - 1.0).abs() < f64::EPSILON);
        assert!((ArmState::new(0.0, 3).sampling_std_dev() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_deactivate_keeps_history() {
        let mut play = Play::new("x_hot_take_v1", Workstream::XPost).with_arm(ArmState::new(2.0, 2));
        play.deactivate();
        assert!(!play.active);
        assert_eq!(play.arm.n, 2);
    }
}
