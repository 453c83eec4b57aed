//! Play repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{ArmState, Play, Workstream};

/// Repository interface for Play persistence.
#[async_trait]
pub trait PlayRepository: Send + Sync {
    /// Active plays of a workstream, ordered by id.
    async fn list_active(&self, workstream: Workstream) -> DomainResult<Vec<Play>>;

    /// All plays, optionally restricted to one workstream, ordered by id.
    async fn list(&self, workstream: Option<Workstream>) -> DomainResult<Vec<Play>>;

    /// Get a play by ID.
    async fn get(&self, id: &str) -> DomainResult<Option<Play>>;

    /// Insert a play, or update workstream/active/params of an existing one.
    ///
    /// Arm statistics of an existing play are never overwritten.
    async fn persist(&self, play: &Play) -> DomainResult<()>;

    /// Atomically fold one reward into a play's arm state.
    ///
    /// Returns the arm state after the increment.
    async fn record_reward(&self, id: &str, reward: f64) -> DomainResult<ArmState>;

    /// Activate or deactivate a play.
    async fn set_active(&self, id: &str, active: bool) -> DomainResult<()>;
}
