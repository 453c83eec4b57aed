//! Port trait definitions (Hexagonal Architecture)
//!
//! Async interfaces the core consumes and adapters implement:
//! - PlayRepository / AttemptRepository: persistence
//! - Writer: content generation backend
//! - Publisher: per-workstream channel adapter
//! - OutcomeMetricsSource: delayed engagement telemetry

pub mod attempt_repository;
pub mod metrics_source;
pub mod play_repository;
pub mod publisher;
pub mod writer;

pub use attempt_repository::{AttemptFilter, AttemptRepository};
pub use metrics_source::OutcomeMetricsSource;
pub use play_repository::PlayRepository;
pub use publisher::Publisher;
pub use writer::Writer;
