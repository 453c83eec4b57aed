//! Content pipeline orchestrator.
//!
//! Drives one task through `Requested → ArmSelected → Drafted → Gated` and
//! on to a terminal stage picked by the ship policy. The run is
//! all-or-nothing with respect to persistence: the attempt record is the
//! last write, so any collaborator failure before it leaves no trace in the
//! attempt store.

use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::adapters::publishers::PublisherRegistry;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    ArmState, AttemptRecord, Config, Draft, PipelineStage, TaskRequest, TaskSpec, Workstream,
};
use crate::domain::ports::{AttemptRepository, PlayRepository, Writer};
use crate::services::bandit::BanditArmSelector;
use crate::services::drafting::compose_draft;
use crate::services::policy_gate::PolicyGate;
use crate::services::quality_gate::QualityGate;
use crate::services::ship_policy::decide_ship;

/// Tunables for a pipeline run.
#[derive(Debug, Clone)]
pub struct OrchestratorSettings {
    pub exploration: f64,
    pub propensity_samples: u32,
    pub generation_timeout: Duration,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl OrchestratorSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            exploration: config.bandit.exploration,
            propensity_samples: config.bandit.propensity_samples,
            generation_timeout: Duration::from_secs(config.generation.timeout_secs),
        }
    }
}

pub struct ContentPipelineOrchestrator {
    plays: Arc<dyn PlayRepository>,
    attempts: Arc<dyn AttemptRepository>,
    writer: Arc<dyn Writer>,
    publishers: PublisherRegistry,
    selector: BanditArmSelector,
    quality_gate: QualityGate,
    policy_gate: PolicyGate,
    settings: OrchestratorSettings,
}

impl ContentPipelineOrchestrator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        plays: Arc<dyn PlayRepository>,
        attempts: Arc<dyn AttemptRepository>,
        writer: Arc<dyn Writer>,
        publishers: PublisherRegistry,
        selector: BanditArmSelector,
        quality_gate: QualityGate,
        policy_gate: PolicyGate,
        settings: OrchestratorSettings,
    ) -> Self {
        Self {
            plays,
            attempts,
            writer,
            publishers,
            selector,
            quality_gate,
            policy_gate,
            settings,
        }
    }

    /// Wire an orchestrator from loaded configuration.
    pub fn from_config(
        config: &Config,
        plays: Arc<dyn PlayRepository>,
        attempts: Arc<dyn AttemptRepository>,
        writer: Arc<dyn Writer>,
        publishers: PublisherRegistry,
    ) -> DomainResult<Self> {
        Ok(Self::new(
            plays,
            attempts,
            writer,
            publishers,
            BanditArmSelector::from_config(&config.bandit),
            QualityGate::new(&config.quality),
            PolicyGate::new(&config.policy)?,
            OrchestratorSettings::from_config(config),
        ))
    }

    /// Run one task end to end and persist its attempt record.
    ///
    /// Errors abort the run before anything is persisted.
    #[instrument(skip(self, request), fields(topic = %request.topic, workstream = tracing::field::Empty))]
    pub async fn run_task(&self, request: TaskRequest) -> DomainResult<AttemptRecord> {
        let workstream = request.resolve_workstream()?;
        tracing::Span::current().record("workstream", workstream.as_str());
        let stage = PipelineStage::Requested;

        let pool = self.candidate_pool(workstream).await?;
        let selection = self.selector.select_with_propensity(
            &pool,
            self.settings.exploration,
            self.settings.propensity_samples,
        )?;
        info!(
            arm_id = %selection.arm_id,
            propensity = selection.propensity,
            candidates = pool.len(),
            "Play selected"
        );
        let stage = advance(stage, PipelineStage::ArmSelected)?;

        let spec = TaskSpec::from_request(&request, workstream, &selection.arm_id);
        let raw = self.generate(&spec).await?;
        let draft = compose_draft(&spec, &raw);
        let stage = advance(stage, PipelineStage::Drafted)?;

        let quality = self.quality_gate.review(&draft);
        let policy = self.policy_gate.review(workstream, &draft);
        let draft = draft.patched(&policy.patches);
        info!(
            quality = quality.status.as_str(),
            quality_issues = quality.issues.len(),
            policy = policy.result.status.as_str(),
            policy_issues = policy.result.issues.len(),
            auto_fixes = ?policy.result.auto_fixes_applied,
            "Draft gated"
        );
        let stage = advance(stage, PipelineStage::Gated)?;

        let decision = decide_ship(&quality, &policy.result);
        let attempt_id = Uuid::new_v4();
        let artifact_location = if decision.is_publish() {
            Some(self.publish(workstream, attempt_id, &draft).await?)
        } else {
            None
        };
        advance(stage, decision.terminal_stage())?;

        let record = AttemptRecord {
            id: attempt_id,
            workstream,
            chosen_arm_id: selection.arm_id,
            context: request,
            draft_hash: draft_hash(&draft),
            quality_gate: quality,
            policy_gate: policy.result,
            ship_decision: decision,
            artifact_location,
            propensity: Some(selection.propensity),
            reward: None,
            settled: false,
            created_at: chrono::Utc::now(),
            settled_at: None,
        };
        self.attempts.insert(&record).await?;

        info!(
            attempt_id = %record.id,
            decision = %record.ship_decision,
            "Attempt recorded"
        );
        Ok(record)
    }

    async fn candidate_pool(&self, workstream: Workstream) -> DomainResult<BTreeMap<String, ArmState>> {
        let candidates = self.plays.list_active(workstream).await?;
        if candidates.is_empty() {
            return Err(DomainError::NoActivePlay(workstream));
        }
        Ok(candidates.into_iter().map(|play| (play.id, play.arm)).collect())
    }

    async fn generate(&self, spec: &TaskSpec) -> DomainResult<String> {
        let timeout = self.settings.generation_timeout;
        let prompt = spec.topic_context();

        match tokio::time::timeout(timeout, self.writer.generate(&prompt, &spec.tone)).await {
            Ok(Ok(raw)) => Ok(raw),
            Ok(Err(DomainError::GenerationFailure(msg))) => {
                warn!(writer = self.writer.name(), error = %msg, "Generation failed");
                Err(DomainError::GenerationFailure(msg))
            }
            Ok(Err(err)) => {
                warn!(writer = self.writer.name(), error = %err, "Generation failed");
                Err(DomainError::GenerationFailure(err.to_string()))
            }
            Err(_) => {
                warn!(writer = self.writer.name(), ?timeout, "Generation timed out");
                Err(DomainError::GenerationFailure(format!(
                    "{} timed out after {timeout:?}",
                    self.writer.name()
                )))
            }
        }
    }

    async fn publish(&self, workstream: Workstream, attempt_id: Uuid, draft: &Draft) -> DomainResult<String> {
        let publisher = self.publishers.get(workstream).ok_or_else(|| {
            DomainError::PublishFailure(format!("No publisher registered for {workstream}"))
        })?;

        publisher.publish(attempt_id, draft).await.map_err(|err| {
            warn!(attempt_id = %attempt_id, error = %err, "Publish failed");
            match err {
                DomainError::PublishFailure(msg) => DomainError::PublishFailure(msg),
                other => DomainError::PublishFailure(other.to_string()),
            }
        })
    }
}

fn advance(from: PipelineStage, to: PipelineStage) -> DomainResult<PipelineStage> {
    if !from.can_transition_to(to) {
        return Err(DomainError::ValidationFailed(format!(
            "Invalid pipeline transition {from} -> {to}"
        )));
    }
    debug!(from = %from, to = %to, "Pipeline stage");
    Ok(to)
}

/// SHA-256 hex digest of the final draft text.
pub fn draft_hash(draft: &Draft) -> String {
    hex::encode(Sha256::digest(draft.text.as_bytes()))
}
