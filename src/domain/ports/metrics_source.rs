//! Outcome metrics port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{AttemptRecord, OutcomeMetrics};

/// Source of delayed engagement metrics for a published attempt.
#[async_trait]
pub trait OutcomeMetricsSource: Send + Sync {
    async fn fetch(&self, attempt: &AttemptRecord) -> DomainResult<OutcomeMetrics>;
}
