//! Gate verdict types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::DraftPatch;

/// How serious a gate finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// A single finding emitted by a gate run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub code: String,
    pub message: String,
}

impl Issue {
    pub fn new(severity: Severity, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn high(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::High, code, message)
    }

    pub fn medium(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Medium, code, message)
    }
}

/// Gate verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateStatus {
    Pass,
    NeedsFix,
}

impl GateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::NeedsFix => "needs_fix",
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// Result of one gate run over a draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateResult {
    pub status: GateStatus,
    pub issues: Vec<Issue>,
    /// Named scores (quality gate only)
    #[serde(default)]
    pub scores: BTreeMap<String, f64>,
    #[serde(default)]
    pub auto_fixes_applied: Vec<String>,
}

impl GateResult {
    /// Build a result whose status follows from the issue list: `pass` iff empty.
    pub fn from_issues(issues: Vec<Issue>) -> Self {
        let status = if issues.is_empty() {
            GateStatus::Pass
        } else {
            GateStatus::NeedsFix
        };
        Self {
            status,
            issues,
            scores: BTreeMap::new(),
            auto_fixes_applied: Vec::new(),
        }
    }

    pub fn with_scores(mut self, scores: BTreeMap<String, f64>) -> Self {
        self.scores = scores;
        self
    }

    pub fn with_auto_fixes(mut self, auto_fixes: Vec<String>) -> Self {
        self.auto_fixes_applied = auto_fixes;
        self
    }

    pub fn passed(&self) -> bool {
        self.status.is_pass()
    }
}

/// A gate result together with the patches the gate asks to apply.
#[derive(Debug, Clone, PartialEq)]
pub struct GateOutcome {
    pub result: GateResult,
    pub patches: Vec<DraftPatch>,
}

impl GateOutcome {
    pub fn unpatched(result: GateResult) -> Self {
        Self {
            result,
            patches: Vec::new(),
        }
    }
}
