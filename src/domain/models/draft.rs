//! Draft domain model.
//!
//! A draft is produced once by the drafting role. The only permitted change
//! afterwards is a [`DraftPatch`] returned by a gate and applied explicitly
//! by the orchestrator.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Workstream;

/// Claims, links and disclosures attached to a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftMetadata {
    #[serde(default)]
    pub claims: Vec<String>,
    #[serde(default)]
    pub links: Vec<String>,
    #[serde(default)]
    pub disclosures: Vec<String>,
}

/// Channel-specific packaging of the draft text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChannelPackage {
    Post {
        text: String,
        alt_text: Option<String>,
    },
    Newsletter {
        subject_a: String,
        subject_b: String,
        preheader: String,
        body_md: String,
    },
    Article {
        title: String,
        body_md: String,
    },
    Listing {
        title: String,
        description_md: String,
        grades: Vec<String>,
    },
}

impl ChannelPackage {
    /// Markdown body, for channels that carry one.
    pub fn body_md(&self) -> Option<&str> {
        match self {
            Self::Newsletter { body_md, .. } | Self::Article { body_md, .. } => Some(body_md),
            Self::Post { .. } | Self::Listing { .. } => None,
        }
    }
}

/// A generated content artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub outline: Vec<String>,
    pub text: String,
    #[serde(default)]
    pub packaging: BTreeMap<Workstream, ChannelPackage>,
    #[serde(default)]
    pub metadata: DraftMetadata,
}

impl Draft {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_disclosures(mut self, disclosures: Vec<String>) -> Self {
        self.metadata.disclosures = disclosures;
        self
    }

    /// Return a copy of this draft with `patches` applied in order.
    #[must_use]
    pub fn patched(&self, patches: &[DraftPatch]) -> Self {
        let mut draft = self.clone();
        for patch in patches {
            patch.apply(&mut draft);
        }
        draft
    }
}

/// A bounded change a gate may request to the draft it evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum DraftPatch {
    /// Append one entry to `metadata.disclosures`.
    AppendDisclosure(String),
}

impl DraftPatch {
    pub fn apply(&self, draft: &mut Draft) {
        match self {
            Self::AppendDisclosure(text) => draft.metadata.disclosures.push(text.clone()),
        }
    }
}
