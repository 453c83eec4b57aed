//! Core services: arm selection, gates, drafting, orchestration and settlement.

pub mod bandit;
pub mod drafting;
pub mod orchestrator;
pub mod playbook;
pub mod policy_gate;
pub mod quality_gate;
pub mod reward_analyst;
pub mod ship_policy;

pub use bandit::{ArmSelection, BanditArmSelector};
pub use drafting::compose_draft;
pub use orchestrator::{ContentPipelineOrchestrator, OrchestratorSettings};
pub use playbook::PlaybookService;
pub use policy_gate::PolicyGate;
pub use quality_gate::QualityGate;
pub use reward_analyst::{compute_reward, RewardAnalyst, SettlementReport};
pub use ship_policy::decide_ship;
