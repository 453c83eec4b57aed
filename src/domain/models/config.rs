use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Workstream;

/// Main configuration structure for Ecole
///
/// Loaded once at process start and handed to the services that need it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Arm selection configuration
    #[serde(default)]
    pub bandit: BanditConfig,

    /// Generation backend configuration
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Publishing outbox configuration
    #[serde(default)]
    pub outbox: OutboxConfig,

    /// Quality gate rule list
    #[serde(default)]
    pub quality: QualityGateConfig,

    /// Policy gate pattern lists
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Reward weight tables
    #[serde(default)]
    pub rewards: RewardConfig,

    /// Playbook: plays to seed into the repository
    #[serde(default = "default_plays")]
    pub plays: Vec<PlayConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
            bandit: BanditConfig::default(),
            generation: GenerationConfig::default(),
            outbox: OutboxConfig::default(),
            quality: QualityGateConfig::default(),
            policy: PolicyConfig::default(),
            rewards: RewardConfig::default(),
            plays: default_plays(),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to `SQLite` database file
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Maximum number of database connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> String {
    ".ecole/ecole.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rotated log files; stderr only when unset
    #[serde(default)]
    pub log_dir: Option<String>,

    /// Rotation policy: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}

/// Arm selection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BanditConfig {
    /// Probability of a uniformly random pick, in `[0, 1]`
    #[serde(default = "default_exploration")]
    pub exploration: f64,

    /// Fixed RNG seed; entropy-seeded when unset
    #[serde(default)]
    pub seed: Option<u64>,

    /// Monte-Carlo draws used to estimate selection propensity
    #[serde(default = "default_propensity_samples")]
    pub propensity_samples: u32,
}

const fn default_exploration() -> f64 {
    0.15
}

const fn default_propensity_samples() -> u32 {
    200
}

impl Default for BanditConfig {
    fn default() -> Self {
        Self {
            exploration: default_exploration(),
            seed: None,
            propensity_samples: default_propensity_samples(),
        }
    }
}

/// Generation backend configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GenerationConfig {
    /// Upper bound on a single generation call
    #[serde(default = "default_generation_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_generation_timeout_secs() -> u64 {
    30
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_generation_timeout_secs(),
        }
    }
}

/// Publishing outbox configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OutboxConfig {
    #[serde(default = "default_outbox_dir")]
    pub dir: String,
}

fn default_outbox_dir() -> String {
    "outbox".to_string()
}

impl Default for OutboxConfig {
    fn default() -> Self {
        Self {
            dir: default_outbox_dir(),
        }
    }
}

/// One quality rule: a score key with its thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityRule {
    pub key: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl QualityRule {
    pub fn required(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            required: true,
            min: None,
            max: None,
        }
    }

    pub fn min(key: impl Into<String>, min: f64) -> Self {
        Self {
            key: key.into(),
            required: false,
            min: Some(min),
            max: None,
        }
    }

    pub fn max(key: impl Into<String>, max: f64) -> Self {
        Self {
            key: key.into(),
            required: false,
            min: None,
            max: Some(max),
        }
    }
}

/// Quality gate rule list (the teaching constitution)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityGateConfig {
    #[serde(default = "default_quality_rules")]
    pub rules: Vec<QualityRule>,
}

fn default_quality_rules() -> Vec<QualityRule> {
    vec![
        QualityRule::required("learning_goal_present"),
        QualityRule::required("cognitive_progression"),
        QualityRule::min("retrieval_presence", 1.0),
        QualityRule::max("reading_level_max_grade", 12.0),
        QualityRule::required("udl_accessibility"),
        QualityRule::required("claims_softened_or_cited"),
    ]
}

impl Default for QualityGateConfig {
    fn default() -> Self {
        Self {
            rules: default_quality_rules(),
        }
    }
}

/// Forbidden-term and PII pattern lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRuleSet {
    #[serde(default)]
    pub forbidden: Vec<String>,
    #[serde(default)]
    pub pii: Vec<String>,
}

/// Workstream-specific replacements for the common lists.
///
/// A list that is present replaces the common list of the same name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyOverride {
    #[serde(default)]
    pub forbidden: Option<Vec<String>>,
    #[serde(default)]
    pub pii: Option<Vec<String>>,
}

/// Policy gate configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default = "default_common_policy")]
    pub common: PolicyRuleSet,

    /// Overrides keyed by workstream name
    #[serde(default)]
    pub workstreams: BTreeMap<String, PolicyOverride>,

    /// Term whose presence requires a disclosure
    #[serde(default = "default_affiliate_term")]
    pub affiliate_term: String,

    /// Disclosure appended when the term is present and undisclosed
    #[serde(default = "default_disclosure")]
    pub disclosure: String,
}

fn default_common_policy() -> PolicyRuleSet {
    PolicyRuleSet {
        forbidden: vec![
            r"\bguarantee[sd]?\b".to_string(),
            r"\bmiracle cure\b".to_string(),
            r"\bget rich quick\b".to_string(),
        ],
        pii: vec![
            r"[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}".to_string(),
            r"\b\d{3}[-.\s]\d{3}[-.\s]\d{4}\b".to_string(),
        ],
    }
}

fn default_affiliate_term() -> String {
    "affiliate".to_string()
}

fn default_disclosure() -> String {
    "This may contain affiliate links.".to_string()
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            common: default_common_policy(),
            workstreams: BTreeMap::new(),
            affiliate_term: default_affiliate_term(),
            disclosure: default_disclosure(),
        }
    }
}

impl PolicyConfig {
    /// Common rules overlaid with the workstream's overrides.
    pub fn rules_for(&self, workstream: Workstream) -> PolicyRuleSet {
        let mut rules = self.common.clone();
        if let Some(over) = self.workstreams.get(workstream.as_str()) {
            if let Some(forbidden) = &over.forbidden {
                rules.forbidden.clone_from(forbidden);
            }
            if let Some(pii) = &over.pii {
                rules.pii.clone_from(pii);
            }
        }
        rules
    }
}

/// Reward weight tables keyed by workstream name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardConfig {
    #[serde(default = "default_reward_weights")]
    pub weights: BTreeMap<String, BTreeMap<String, f64>>,
}

fn default_weight_table() -> BTreeMap<String, f64> {
    BTreeMap::from([
        ("short_term".to_string(), 0.2),
        ("medium_term".to_string(), 0.3),
        ("long_term".to_string(), 0.5),
        ("penalty_policy_incident".to_string(), -1.0),
    ])
}

fn default_reward_weights() -> BTreeMap<String, BTreeMap<String, f64>> {
    Workstream::ALL
        .iter()
        .map(|ws| (ws.as_str().to_string(), default_weight_table()))
        .collect()
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            weights: default_reward_weights(),
        }
    }
}

impl RewardConfig {
    pub fn weights_for(&self, workstream: Workstream) -> Option<&BTreeMap<String, f64>> {
        self.weights.get(workstream.as_str())
    }
}

/// A play entry in the playbook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayConfig {
    pub id: String,
    pub workstream: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub params: BTreeMap<String, serde_json::Value>,
}

const fn default_true() -> bool {
    true
}

impl PlayConfig {
    pub fn new(id: impl Into<String>, workstream: Workstream) -> Self {
        Self {
            id: id.into(),
            workstream: workstream.as_str().to_string(),
            active: true,
            params: BTreeMap::new(),
        }
    }
}

fn default_plays() -> Vec<PlayConfig> {
    vec![
        PlayConfig::new("x_hot_take_v1", Workstream::XPost),
        PlayConfig::new("x_myth_buster_v1", Workstream::XPost),
        PlayConfig::new("x_thread_walkthrough_v1", Workstream::XThread),
        PlayConfig::new("newsletter_deep_dive_v1", Workstream::Newsletter),
        PlayConfig::new("medium_case_study_v1", Workstream::Medium),
        PlayConfig::new("tpt_worksheet_v1", Workstream::Tpt),
    ]
}
