//! Attempt record and delayed outcome metrics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::{GateResult, ShipDecision, TaskRequest, Workstream};

/// Persisted outcome of one successful pipeline run.
///
/// Immutable after creation except for `reward`/`settled`, which transition
/// exactly once during settlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub id: Uuid,
    pub workstream: Workstream,
    pub chosen_arm_id: String,
    /// The request that produced this attempt
    pub context: TaskRequest,
    /// SHA-256 of the final draft text
    pub draft_hash: String,
    pub quality_gate: GateResult,
    pub policy_gate: GateResult,
    pub ship_decision: ShipDecision,
    pub artifact_location: Option<String>,
    /// Selection probability of the chosen arm at decision time
    pub propensity: Option<f64>,
    pub reward: Option<f64>,
    pub settled: bool,
    pub created_at: DateTime<Utc>,
    pub settled_at: Option<DateTime<Utc>>,
}

impl AttemptRecord {
    pub fn is_pending(&self) -> bool {
        !self.settled && self.reward.is_none()
    }
}

/// Engagement signals observed at three horizons after publication.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeMetrics {
    pub short_term: f64,
    pub medium_term: f64,
    pub long_term: f64,
}

impl OutcomeMetrics {
    pub const SHORT_TERM: &'static str = "short_term";
    pub const MEDIUM_TERM: &'static str = "medium_term";
    pub const LONG_TERM: &'static str = "long_term";

    /// Metrics keyed by the names used in reward weight tables.
    pub fn as_map(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([
            (Self::SHORT_TERM, self.short_term),
            (Self::MEDIUM_TERM, self.medium_term),
            (Self::LONG_TERM, self.long_term),
        ])
    }
}
