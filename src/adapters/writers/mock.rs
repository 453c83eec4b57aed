//! Deterministic generation backend.
//!
//! Produces `"{prompt} | tone:{tone} | {digest}"`, where the digest is the
//! first 8 hex characters of SHA-256 over prompt and tone. Failure and latency
//! can be injected for exercising the pipeline's abort paths.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::Writer;

#[derive(Debug, Default)]
pub struct MockWriter {
    /// Fail every call with this message
    failure: Option<String>,
    /// Sleep this long before answering
    latency: Option<Duration>,
    calls: AtomicUsize,
}

impl MockWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Number of generate calls issued so far, including failed ones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn digest(prompt: &str, tone: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(prompt.as_bytes());
        hasher.update(tone.as_bytes());
        let mut hex = hex::encode(hasher.finalize());
        hex.truncate(8);
        hex
    }
}

#[async_trait]
impl Writer for MockWriter {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(&self, topic_context: &str, tone: &str) -> DomainResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if let Some(message) = &self.failure {
            return Err(DomainError::GenerationFailure(message.clone()));
        }

        Ok(format!(
            "{topic_context} | tone:{tone} | {}",
            Self::digest(topic_context, tone)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_generate_is_deterministic() {
        let writer = MockWriter::new();
        let first = writer.generate("Active recall for students", "warm").await.unwrap();
        let second = writer.generate("Active recall for students", "warm").await.unwrap();

        assert_eq!(first, second);
        assert!(first.starts_with("Active recall for students | tone:warm | "));
        assert_eq!(first.rsplit(" | ").next().unwrap().len(), 8);
        assert_eq!(writer.calls(), 2);
    }

    #[tokio::test]
    async fn test_tone_changes_digest() {
        assert_ne!(MockWriter::digest("p", "warm"), MockWriter::digest("p", "dry"));
    }

    #[tokio::test]
    async fn test_failing_writer() {
        let writer = MockWriter::failing("backend down");
        let err = writer.generate("p", "").await.unwrap_err();
        assert!(matches!(err, DomainError::GenerationFailure(msg) if msg == "backend down"));
        assert_eq!(writer.calls(), 1);
    }
}
