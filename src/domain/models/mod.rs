pub mod arm;
pub mod attempt;
pub mod config;
pub mod draft;
pub mod gate;
pub mod ship;
pub mod task;
pub mod workstream;

pub use arm::{ArmState, Play};
pub use attempt::{AttemptRecord, OutcomeMetrics};
pub use config::{
    BanditConfig, Config, DatabaseConfig, GenerationConfig, LoggingConfig, OutboxConfig,
    PlayConfig, PolicyConfig, PolicyOverride, PolicyRuleSet, QualityGateConfig, QualityRule,
    RewardConfig,
};
pub use draft::{ChannelPackage, Draft, DraftMetadata, DraftPatch};
pub use gate::{GateOutcome, GateResult, GateStatus, Issue, Severity};
pub use ship::{AbSplit, PipelineStage, ShipDecision};
pub use task::{TaskRequest, TaskSpec};
pub use workstream::Workstream;
