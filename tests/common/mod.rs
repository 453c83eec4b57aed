//! Common test utilities for integration tests
//!
//! Provides shared fixtures used across multiple integration test files.

#![allow(dead_code)]

use sqlx::SqlitePool;
use std::sync::Arc;
use tempfile::TempDir;

use ecole::adapters::publishers::PublisherRegistry;
use ecole::adapters::sqlite::{
    create_migrated_test_pool, database_url, initialize_database, PoolConfig,
    SqliteAttemptRepository, SqlitePlayRepository,
};
use ecole::adapters::writers::MockWriter;
use ecole::{Config, ContentPipelineOrchestrator, PlaybookService};

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Repositories over one database plus a scratch outbox.
pub struct TestEnv {
    pub pool: SqlitePool,
    pub plays: Arc<SqlitePlayRepository>,
    pub attempts: Arc<SqliteAttemptRepository>,
    pub outbox: TempDir,
    /// Keeps a file-backed database alive for the test's duration
    pub db_dir: Option<TempDir>,
}

impl TestEnv {
    fn from_pool(pool: SqlitePool, db_dir: Option<TempDir>) -> Self {
        Self {
            plays: Arc::new(SqlitePlayRepository::new(pool.clone())),
            attempts: Arc::new(SqliteAttemptRepository::new(pool.clone())),
            pool,
            outbox: tempfile::tempdir().expect("Failed to create outbox dir"),
            db_dir,
        }
    }

    /// In-memory database seeded with the default playbook.
    pub async fn seeded() -> Self {
        let pool = create_migrated_test_pool().await.expect("Failed to create test pool");
        let env = Self::from_pool(pool, None);
        env.seed(&Config::default()).await;
        env
    }

    /// File-backed database with a multi-connection pool, seeded with the
    /// default playbook. Used where writers must genuinely overlap.
    pub async fn file_backed() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create db dir");
        let url = database_url(&dir.path().join("ecole.db").to_string_lossy());
        let pool = initialize_database(
            &url,
            PoolConfig {
                max_connections: 8,
                ..PoolConfig::default()
            },
        )
        .await
        .expect("Failed to open file database");
        let env = Self::from_pool(pool, Some(dir));
        env.seed(&Config::default()).await;
        env
    }

    pub async fn seed(&self, config: &Config) {
        PlaybookService::new(self.plays.clone())
            .seed(&config.plays)
            .await
            .expect("Failed to seed playbook");
    }

    pub fn orchestrator(&self, config: &Config) -> ContentPipelineOrchestrator {
        ContentPipelineOrchestrator::from_config(
            config,
            self.plays.clone(),
            self.attempts.clone(),
            Arc::new(MockWriter::new()),
            PublisherRegistry::outbox(self.outbox.path()),
        )
        .expect("Failed to build orchestrator")
    }
}

/// Default configuration with a fixed selector seed.
pub fn seeded_config(seed: u64) -> Config {
    let mut config = Config::default();
    config.bandit.seed = Some(seed);
    config.bandit.propensity_samples = 50;
    config
}
