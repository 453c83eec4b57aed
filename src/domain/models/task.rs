//! Task request and resolved task spec.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Workstream;
use crate::domain::errors::DomainResult;

fn default_objective() -> String {
    "subs".to_string()
}

/// Incoming content task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRequest {
    /// Workstream name; `x_post` when absent
    #[serde(default)]
    pub workstream: Option<String>,
    pub topic: String,
    pub audience: String,
    #[serde(default = "default_objective")]
    pub objective: String,
    #[serde(default)]
    pub tone: String,
    #[serde(default)]
    pub constraints: BTreeMap<String, serde_json::Value>,
}

impl TaskRequest {
    pub fn new(topic: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            workstream: None,
            topic: topic.into(),
            audience: audience.into(),
            objective: default_objective(),
            tone: String::new(),
            constraints: BTreeMap::new(),
        }
    }

    pub fn with_workstream(mut self, workstream: impl Into<String>) -> Self {
        self.workstream = Some(workstream.into());
        self
    }

    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = tone.into();
        self
    }

    /// Resolve the requested workstream, defaulting to `x_post`.
    pub fn resolve_workstream(&self) -> DomainResult<Workstream> {
        self.workstream
            .as_deref()
            .map_or(Ok(Workstream::default()), |name| name.parse())
    }
}

/// A request bound to a workstream and a chosen play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSpec {
    pub objective: String,
    pub workstream: Workstream,
    pub topic: String,
    pub audience: String,
    pub tone: String,
    pub constraints: BTreeMap<String, serde_json::Value>,
    pub play_id: String,
}

impl TaskSpec {
    pub fn from_request(request: &TaskRequest, workstream: Workstream, play_id: impl Into<String>) -> Self {
        Self {
            objective: request.objective.clone(),
            workstream,
            topic: request.topic.clone(),
            audience: request.audience.clone(),
            tone: request.tone.clone(),
            constraints: request.constraints.clone(),
            play_id: play_id.into(),
        }
    }

    /// Prompt handed to the generation backend.
    pub fn topic_context(&self) -> String {
        format!("{} for {}", self.topic, self.audience)
    }
}
