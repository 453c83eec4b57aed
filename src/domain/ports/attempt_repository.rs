//! Attempt repository port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::{ArmState, AttemptRecord, Workstream};

/// Filter criteria for listing attempts.
#[derive(Debug, Clone, Default)]
pub struct AttemptFilter {
    pub workstream: Option<Workstream>,
    pub settled: Option<bool>,
    pub limit: Option<i64>,
}

/// Repository interface for AttemptRecord persistence.
#[async_trait]
pub trait AttemptRepository: Send + Sync {
    /// Insert a new attempt.
    async fn insert(&self, attempt: &AttemptRecord) -> DomainResult<()>;

    /// Get an attempt by ID.
    async fn get(&self, id: Uuid) -> DomainResult<Option<AttemptRecord>>;

    /// List attempts, newest first.
    async fn list(&self, filter: AttemptFilter) -> DomainResult<Vec<AttemptRecord>>;

    /// Attempts still waiting for a reward, oldest first.
    async fn list_unsettled(&self) -> DomainResult<Vec<AttemptRecord>>;

    /// Set the reward and mark the attempt settled, iff it is still unsettled.
    ///
    /// Must be a single conditional write. Returns `false` when another
    /// settlement already claimed the attempt.
    async fn settle(&self, id: Uuid, reward: f64) -> DomainResult<bool>;

    /// Claim the attempt and fold `reward` into its play's arm as one unit.
    ///
    /// Both writes commit together or not at all. Returns `None` when the
    /// attempt was already claimed, otherwise the arm's updated statistics.
    async fn settle_and_credit(
        &self,
        id: Uuid,
        play_id: &str,
        reward: f64,
    ) -> DomainResult<Option<ArmState>>;
}
