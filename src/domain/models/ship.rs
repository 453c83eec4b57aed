//! Ship decisions and pipeline stages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Traffic split for an A/B publication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbSplit {
    pub variants: Vec<String>,
    /// Share of traffic routed to the first variant, in `[0, 1]`
    pub traffic_share: f64,
}

/// Terminal decision for a task.
///
/// `Discard` and `AbTest` are part of the taxonomy but the current ship
/// policy never produces them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ShipDecision {
    Publish,
    Revise,
    Discard,
    AbTest(AbSplit),
}

impl ShipDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Publish => "publish",
            Self::Revise => "revise",
            Self::Discard => "discard",
            Self::AbTest(_) => "ab_test",
        }
    }

    pub fn is_publish(&self) -> bool {
        matches!(self, Self::Publish)
    }

    /// Terminal pipeline stage reached by this decision.
    pub fn terminal_stage(&self) -> PipelineStage {
        match self {
            Self::Publish | Self::AbTest(_) => PipelineStage::Shipped,
            Self::Revise => PipelineStage::Revise,
            Self::Discard => PipelineStage::Discard,
        }
    }
}

impl fmt::Display for ShipDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stage of a single pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Requested,
    ArmSelected,
    Drafted,
    Gated,
    Shipped,
    Revise,
    Discard,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::ArmSelected => "arm_selected",
            Self::Drafted => "drafted",
            Self::Gated => "gated",
            Self::Shipped => "shipped",
            Self::Revise => "revise",
            Self::Discard => "discard",
        }
    }

    pub fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Requested, Self::ArmSelected)
                | (Self::ArmSelected, Self::Drafted)
                | (Self::Drafted, Self::Gated)
                | (Self::Gated, Self::Shipped)
                | (Self::Gated, Self::Revise)
                | (Self::Gated, Self::Discard)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Shipped | Self::Revise | Self::Discard)
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
