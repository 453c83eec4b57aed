//! Reward analyst: the delayed settlement loop.
//!
//! Each pass walks the unsettled attempts, turns their outcome metrics into a
//! scalar reward and settles them. Claiming an attempt and crediting its arm
//! commit together in the attempt store, so overlapping passes never settle
//! the same attempt twice, and a settled attempt has always been counted by
//! exactly one arm.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{AttemptRecord, OutcomeMetrics, RewardConfig};
use crate::domain::ports::{AttemptRepository, OutcomeMetricsSource};

/// Weight keys with this prefix are reported but never summed.
pub const PENALTY_PREFIX: &str = "penalty";

/// Tally of one settlement pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SettlementReport {
    /// Unsettled attempts seen at the start of the pass
    pub examined: usize,
    pub settled: usize,
    /// Claimed by an overlapping pass
    pub skipped: usize,
    pub failed: usize,
}

/// `Σ weight·metric` over the non-penalty keys of a weight table.
///
/// Keys with no matching metric contribute 0.
pub fn compute_reward(weights: &BTreeMap<String, f64>, metrics: &OutcomeMetrics) -> f64 {
    let values = metrics.as_map();
    weights
        .iter()
        .filter(|(key, _)| !key.starts_with(PENALTY_PREFIX))
        .map(|(key, weight)| weight * values.get(key.as_str()).copied().unwrap_or(0.0))
        .sum()
}

pub struct RewardAnalyst {
    attempts: Arc<dyn AttemptRepository>,
    metrics: Arc<dyn OutcomeMetricsSource>,
    rewards: RewardConfig,
}

impl RewardAnalyst {
    pub fn new(
        attempts: Arc<dyn AttemptRepository>,
        metrics: Arc<dyn OutcomeMetricsSource>,
        rewards: RewardConfig,
    ) -> Self {
        Self {
            attempts,
            metrics,
            rewards,
        }
    }

    /// Settle every attempt that is still pending.
    ///
    /// A failure on one attempt is counted and logged; the pass continues.
    #[instrument(skip(self))]
    pub async fn process(&self) -> DomainResult<SettlementReport> {
        let pending = self.attempts.list_unsettled().await?;
        let mut report = SettlementReport {
            examined: pending.len(),
            ..SettlementReport::default()
        };

        for attempt in &pending {
            match self.settle_one(attempt).await {
                Ok(reward) => {
                    report.settled += 1;
                    debug!(attempt_id = %attempt.id, reward, "Attempt settled");
                }
                Err(err) if err.is_skippable() => {
                    report.skipped += 1;
                    debug!(attempt_id = %attempt.id, "Attempt already settled, skipping");
                }
                Err(err) => {
                    report.failed += 1;
                    warn!(attempt_id = %attempt.id, error = %err, "Settlement failed");
                }
            }
        }

        info!(
            examined = report.examined,
            settled = report.settled,
            skipped = report.skipped,
            failed = report.failed,
            "Settlement pass complete"
        );
        Ok(report)
    }

    async fn settle_one(&self, attempt: &AttemptRecord) -> DomainResult<f64> {
        let metrics = self.metrics.fetch(attempt).await?;
        let weights = self.rewards.weights_for(attempt.workstream).ok_or_else(|| {
            DomainError::ValidationFailed(format!("No reward weights for {}", attempt.workstream))
        })?;
        let reward = compute_reward(weights, &metrics);

        let arm = self
            .attempts
            .settle_and_credit(attempt.id, &attempt.chosen_arm_id, reward)
            .await?
            .ok_or(DomainError::AlreadySettled(attempt.id))?;
        debug!(
            arm_id = %attempt.chosen_arm_id,
            n = arm.n,
            mean = arm.mean(),
            "Arm updated"
        );
        Ok(reward)
    }
}
