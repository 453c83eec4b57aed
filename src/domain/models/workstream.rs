//! Workstream model.
//!
//! A workstream is a publishing channel. Plays, reward weights, policy
//! overrides and publishers are all keyed by workstream.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::errors::DomainError;

/// Publishing channel a task is produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Workstream {
    /// Single short post
    XPost,
    /// Multi-post thread
    XThread,
    /// Email newsletter issue
    Newsletter,
    /// Long-form article
    Medium,
    /// Teaching resource listing
    Tpt,
}

impl Default for Workstream {
    fn default() -> Self {
        Self::XPost
    }
}

impl Workstream {
    /// Every workstream, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::XPost,
        Self::XThread,
        Self::Newsletter,
        Self::Medium,
        Self::Tpt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::XPost => "x_post",
            Self::XThread => "x_thread",
            Self::Newsletter => "newsletter",
            Self::Medium => "medium",
            Self::Tpt => "tpt",
        }
    }
}

impl fmt::Display for Workstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Workstream {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "x_post" => Ok(Self::XPost),
            "x_thread" => Ok(Self::XThread),
            "newsletter" => Ok(Self::Newsletter),
            "medium" => Ok(Self::Medium),
            "tpt" => Ok(Self::Tpt),
            _ => Err(DomainError::InvalidWorkstream(s.to_string())),
        }
    }
}
