use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use regex::Regex;
use std::collections::BTreeSet;
use thiserror::Error;

use crate::domain::models::{Config, Workstream};

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const VALID_LOG_FORMATS: [&str; 2] = ["json", "pretty"];
const VALID_ROTATIONS: [&str; 3] = ["daily", "hourly", "never"];

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid exploration rate: {0}. Must be between 0 and 1")]
    InvalidExploration(f64),

    #[error("Invalid propensity_samples: {0}. Must be at least 1")]
    InvalidPropensitySamples(u32),

    #[error("Invalid generation timeout: {0}s. Must be at least 1")]
    InvalidGenerationTimeout(u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidLogRotation(String),

    #[error("Database path cannot be empty")]
    EmptyDatabasePath,

    #[error("Invalid max_connections: {0}. Must be at least 1")]
    InvalidMaxConnections(u32),

    #[error("Quality rule '{0}' has no threshold and is not required")]
    InertQualityRule(String),

    #[error("Invalid policy pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Affiliate disclosure text cannot be empty")]
    EmptyDisclosure,

    #[error("Non-finite reward weight {workstream}.{key}")]
    NonFiniteWeight { workstream: String, key: String },

    #[error("Unknown workstream '{0}' in {1}")]
    UnknownWorkstream(String, &'static str),

    #[error("Duplicate play id: {0}")]
    DuplicatePlay(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .ecole/config.yaml (project config)
    /// 3. .ecole/local.yaml (project local overrides, optional)
    /// 4. Environment variables (ECOLE_* prefix, `__` separates nesting)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".ecole/config.yaml"))
            .merge(Yaml::file(".ecole/local.yaml"))
            .merge(Env::prefixed("ECOLE_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.as_ref().display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&config.bandit.exploration) {
            return Err(ConfigError::InvalidExploration(config.bandit.exploration));
        }
        if config.bandit.propensity_samples == 0 {
            return Err(ConfigError::InvalidPropensitySamples(0));
        }
        if config.generation.timeout_secs == 0 {
            return Err(ConfigError::InvalidGenerationTimeout(0));
        }

        if config.database.path.is_empty() {
            return Err(ConfigError::EmptyDatabasePath);
        }
        if config.database.max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections(0));
        }

        if !VALID_LOG_LEVELS.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }
        if !VALID_LOG_FORMATS.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }
        if !VALID_ROTATIONS.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidLogRotation(config.logging.rotation.clone()));
        }

        for rule in &config.quality.rules {
            if !rule.required && rule.min.is_none() && rule.max.is_none() {
                return Err(ConfigError::InertQualityRule(rule.key.clone()));
            }
        }

        Self::validate_policy(config)?;
        Self::validate_rewards(config)?;
        Self::validate_plays(config)
    }

    fn validate_policy(config: &Config) -> Result<(), ConfigError> {
        let policy = &config.policy;
        let overrides = policy.workstreams.values().flat_map(|o| {
            o.forbidden.iter().flatten().chain(o.pii.iter().flatten())
        });
        for pattern in policy.common.forbidden.iter().chain(&policy.common.pii).chain(overrides) {
            Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })?;
        }

        for name in policy.workstreams.keys() {
            check_workstream(name, "policy.workstreams")?;
        }

        if policy.disclosure.trim().is_empty() {
            return Err(ConfigError::EmptyDisclosure);
        }
        Ok(())
    }

    fn validate_rewards(config: &Config) -> Result<(), ConfigError> {
        for (workstream, table) in &config.rewards.weights {
            check_workstream(workstream, "rewards.weights")?;
            if let Some((key, _)) = table.iter().find(|(_, w)| !w.is_finite()) {
                return Err(ConfigError::NonFiniteWeight {
                    workstream: workstream.clone(),
                    key: key.clone(),
                });
            }
        }
        Ok(())
    }

    fn validate_plays(config: &Config) -> Result<(), ConfigError> {
        let mut seen = BTreeSet::new();
        for play in &config.plays {
            check_workstream(&play.workstream, "plays")?;
            if !seen.insert(play.id.as_str()) {
                return Err(ConfigError::DuplicatePlay(play.id.clone()));
            }
        }
        Ok(())
    }
}

fn check_workstream(name: &str, section: &'static str) -> Result<Workstream, ConfigError> {
    name.parse()
        .map_err(|_| ConfigError::UnknownWorkstream(name.to_string(), section))
}
