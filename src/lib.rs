//! Ecole - bandit-driven content pipeline
//!
//! Ecole picks a content strategy ("play") per task with a Thompson-style
//! bandit, drafts the content, runs it through a pedagogy gate and a policy
//! gate, ships or sends it back for revision, and later settles a delayed
//! reward into the chosen play's statistics.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, errors and port traits
//! - **Service Layer** (`services`): selection, gates, orchestration, settlement
//! - **Adapters** (`adapters`): SQLite repositories, writers, publishers, metrics
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use ecole::adapters::publishers::PublisherRegistry;
//! use ecole::adapters::sqlite::{create_migrated_test_pool, SqliteAttemptRepository, SqlitePlayRepository};
//! use ecole::adapters::writers::MockWriter;
//! use ecole::{Config, ContentPipelineOrchestrator, TaskRequest};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = create_migrated_test_pool().await?;
//!     let orchestrator = ContentPipelineOrchestrator::from_config(
//!         &Config::default(),
//!         Arc::new(SqlitePlayRepository::new(pool.clone())),
//!         Arc::new(SqliteAttemptRepository::new(pool)),
//!         Arc::new(MockWriter::new()),
//!         PublisherRegistry::outbox("outbox"),
//!     )?;
//!     let attempt = orchestrator.run_task(TaskRequest::new("Active recall", "students")).await?;
//!     println!("{}", attempt.ship_decision);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    ArmState, AttemptRecord, Config, Draft, GateResult, GateStatus, Play, ShipDecision,
    TaskRequest, Workstream,
};
pub use domain::ports::{
    AttemptRepository, OutcomeMetricsSource, PlayRepository, Publisher, Writer,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    BanditArmSelector, ContentPipelineOrchestrator, PlaybookService, PolicyGate, QualityGate,
    RewardAnalyst, SettlementReport,
};
