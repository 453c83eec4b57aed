//! Publisher port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Draft, Workstream};

/// Channel adapter that publishes a shipped draft.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Workstream this publisher serves.
    fn workstream(&self) -> Workstream;

    /// Publish the draft and return where the artifact landed.
    async fn publish(&self, attempt_id: Uuid, draft: &Draft) -> DomainResult<String>;
}
