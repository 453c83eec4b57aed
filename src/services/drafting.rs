//! Drafting role: turns raw generated text into a packaged draft.

use std::collections::BTreeMap;

use crate::domain::models::{ChannelPackage, Draft, TaskSpec, Workstream};

/// Scaffold appended to every generated text so the draft carries the
/// learning-goal, progression, retrieval and accessibility cues.
pub const PEDAGOGICAL_SCAFFOLD: &str =
    "learn to remember, understand and apply? Here is an example that may help you.";

const POST_LIMIT: usize = 280;

/// Build the draft for a task from the generation backend's raw output.
pub fn compose_draft(spec: &TaskSpec, raw: &str) -> Draft {
    let text = format!("{} {PEDAGOGICAL_SCAFFOLD}", raw.trim_end());
    let outline = ["hook", "point_1", "point_2", "cta"]
        .iter()
        .map(|s| (*s).to_string())
        .collect();

    Draft {
        outline,
        packaging: package_all(&spec.topic, &text),
        text,
        metadata: Default::default(),
    }
}

fn package_all(topic: &str, text: &str) -> BTreeMap<Workstream, ChannelPackage> {
    let post = || ChannelPackage::Post {
        text: truncate_chars(text, POST_LIMIT),
        alt_text: None,
    };
    BTreeMap::from([
        (Workstream::XPost, post()),
        (Workstream::XThread, post()),
        (
            Workstream::Newsletter,
            ChannelPackage::Newsletter {
                subject_a: topic.to_string(),
                subject_b: format!("{topic}!"),
                preheader: String::new(),
                body_md: text.to_string(),
            },
        ),
        (
            Workstream::Medium,
            ChannelPackage::Article {
                title: topic.to_string(),
                body_md: text.to_string(),
            },
        ),
        (
            Workstream::Tpt,
            ChannelPackage::Listing {
                title: topic.to_string(),
                description_md: text.to_string(),
                grades: vec!["9-12".to_string()],
            },
        ),
    ])
}

fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::TaskRequest;

    fn spec() -> TaskSpec {
        let request = TaskRequest::new("Active recall", "college students");
        TaskSpec::from_request(&request, Workstream::XPost, "x_hot_take_v1")
    }

    #[test]
    fn test_text_carries_scaffold() {
        let draft = compose_draft(&spec(), "Quiz yourself.");
        assert_eq!(
            draft.text,
            format!("Quiz yourself. {PEDAGOGICAL_SCAFFOLD}")
        );
        assert_eq!(draft.outline.len(), 4);
        assert!(draft.metadata.disclosures.is_empty());
    }

    #[test]
    fn test_every_workstream_is_packaged() {
        let draft = compose_draft(&spec(), "x");
        for ws in Workstream::ALL {
            assert!(draft.packaging.contains_key(&ws), "missing {ws}");
        }
        match &draft.packaging[&Workstream::Newsletter] {
            ChannelPackage::Newsletter { subject_b, .. } => assert_eq!(subject_b, "Active recall!"),
            other => panic!("unexpected package {other:?}"),
        }
    }

    #[test]
    fn test_post_text_is_truncated() {
        let long = "a".repeat(500);
        let draft = compose_draft(&spec(), &long);
        match &draft.packaging[&Workstream::XPost] {
            ChannelPackage::Post { text, .. } => assert_eq!(text.chars().count(), POST_LIMIT),
            other => panic!("unexpected package {other:?}"),
        }
    }
}
