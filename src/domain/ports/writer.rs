//! Writer port - interface for content generation backends.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;

/// A pluggable generation backend.
///
/// Implementations may fail or stall; callers bound each call with a timeout.
#[async_trait]
pub trait Writer: Send + Sync {
    /// Backend name, for logging.
    fn name(&self) -> &'static str;

    /// Produce raw text for a topic context in the requested tone.
    async fn generate(&self, topic_context: &str, tone: &str) -> DomainResult<String>;
}
