//! Shared wiring for CLI commands.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use std::path::Path;
use std::sync::Arc;

use crate::adapters::metrics::SimulatedMetrics;
use crate::adapters::publishers::PublisherRegistry;
use crate::adapters::sqlite::{
    database_url, initialize_database, PoolConfig, SqliteAttemptRepository, SqlitePlayRepository,
};
use crate::adapters::writers::MockWriter;
use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;
use crate::services::{ContentPipelineOrchestrator, PlaybookService, RewardAnalyst};

/// Load configuration from an explicit file or the `.ecole/` hierarchy.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

/// Loaded configuration plus an open, migrated database.
pub struct AppContext {
    pub config: Config,
    pub pool: SqlitePool,
}

impl AppContext {
    pub async fn open(config: Config) -> Result<Self> {
        let url = database_url(&config.database.path);
        let pool = initialize_database(&url, PoolConfig::from(&config.database))
            .await
            .with_context(|| format!("Failed to open database at {}", config.database.path))?;
        Ok(Self { config, pool })
    }

    pub fn plays(&self) -> Arc<SqlitePlayRepository> {
        Arc::new(SqlitePlayRepository::new(self.pool.clone()))
    }

    pub fn attempts(&self) -> Arc<SqliteAttemptRepository> {
        Arc::new(SqliteAttemptRepository::new(self.pool.clone()))
    }

    pub fn playbook(&self) -> PlaybookService {
        PlaybookService::new(self.plays())
    }

    pub fn orchestrator(&self) -> Result<ContentPipelineOrchestrator> {
        ContentPipelineOrchestrator::from_config(
            &self.config,
            self.plays(),
            self.attempts(),
            Arc::new(MockWriter::new()),
            PublisherRegistry::outbox(&self.config.outbox.dir),
        )
        .context("Failed to build pipeline")
    }

    pub fn analyst(&self) -> RewardAnalyst {
        RewardAnalyst::new(
            self.attempts(),
            Arc::new(SimulatedMetrics::new()),
            self.config.rewards.clone(),
        )
    }
}
