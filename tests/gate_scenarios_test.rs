//! Quality and policy gates combined through the ship policy.

use ecole::domain::models::{
    DraftPatch, GateStatus, PolicyConfig, PolicyOverride, QualityGateConfig, Severity,
    ShipDecision,
};
use ecole::adapters::writers::MockWriter;
use ecole::domain::models::TaskSpec;
use ecole::services::{compose_draft, decide_ship, PolicyGate, QualityGate};
use ecole::{Draft, TaskRequest, Workstream, Writer};

const TEACHING_TEXT: &str =
    "Students will learn to remember, understand and apply? Here is an example that may help you.";

fn gates() -> (QualityGate, PolicyGate) {
    (
        QualityGate::new(&QualityGateConfig::default()),
        PolicyGate::new(&PolicyConfig::default()).expect("default policy compiles"),
    )
}

fn decide(text: &str, workstream: Workstream) -> ShipDecision {
    let (quality, policy) = gates();
    let draft = Draft::new(text);
    decide_ship(&quality.review(&draft), &policy.review(workstream, &draft).result)
}

#[test]
fn test_clean_teaching_text_ships_on_every_workstream() {
    for workstream in Workstream::ALL {
        assert_eq!(decide(TEACHING_TEXT, workstream), ShipDecision::Publish, "{workstream}");
    }
}

#[test]
fn test_either_gate_failing_forces_revise() {
    let quality_fail = "Nothing to see here.";
    let policy_fail = format!("{TEACHING_TEXT} Results guaranteed.");

    assert_eq!(decide(quality_fail, Workstream::XPost), ShipDecision::Revise);
    assert_eq!(decide(&policy_fail, Workstream::XPost), ShipDecision::Revise);
}

#[test]
fn test_pii_in_otherwise_good_text_blocks_shipping() {
    let text = format!("{TEACHING_TEXT} Call 555-123-4567.");
    let (_, policy) = gates();
    let outcome = policy.review(Workstream::Newsletter, &Draft::new(text.as_str()));

    assert_eq!(outcome.result.status, GateStatus::NeedsFix);
    assert_eq!(decide(&text, Workstream::Newsletter), ShipDecision::Revise);
}

#[test]
fn test_affiliate_disclosure_is_added_exactly_once() {
    let (_, policy) = gates();
    let draft = Draft::new(format!("{TEACHING_TEXT} Our affiliate partner has more."));

    let first = policy.review(Workstream::Newsletter, &draft);
    assert!(first.result.passed());
    assert_eq!(
        first.patches,
        vec![DraftPatch::AppendDisclosure(PolicyConfig::default().disclosure)]
    );

    let patched = draft.patched(&first.patches);
    let second = policy.review(Workstream::Newsletter, &patched);
    assert!(second.patches.is_empty());
    assert!(second.result.auto_fixes_applied.is_empty());
    assert_eq!(patched.patched(&second.patches).metadata.disclosures.len(), 1);
}

#[test]
fn test_missing_goal_and_progression_yield_two_high_issues() {
    let (quality, _) = gates();
    let result = quality.review(&Draft::new("Remember this? Here is an example that may help."));

    let high: Vec<&str> = result
        .issues
        .iter()
        .filter(|issue| issue.severity == Severity::High)
        .map(|issue| issue.code.as_str())
        .collect();
    assert_eq!(high, vec!["learning_goal_present", "cognitive_progression"]);
    assert_eq!(result.status, GateStatus::NeedsFix);
}

#[test]
fn test_workstream_override_replaces_common_forbidden_list() {
    let mut config = PolicyConfig::default();
    config.workstreams.insert(
        "tpt".to_string(),
        PolicyOverride {
            forbidden: Some(vec![r"\bfree\b".to_string()]),
            pii: None,
        },
    );
    let policy = PolicyGate::new(&config).expect("override compiles");

    let text = "A guaranteed free worksheet.";
    let tpt = policy.review(Workstream::Tpt, &Draft::new(text));
    let x_post = policy.review(Workstream::XPost, &Draft::new(text));

    assert_eq!(tpt.result.issues.len(), 1);
    assert_eq!(tpt.result.issues[0].message, r"\bfree\b");
    assert_eq!(x_post.result.issues.len(), 1);
    assert_eq!(x_post.result.issues[0].message, r"\bguarantee[sd]?\b");
}

async fn mock_draft(topic: &str, audience: &str) -> Draft {
    let request = TaskRequest::new(topic, audience).with_tone("warm");
    let spec = TaskSpec::from_request(&request, Workstream::Newsletter, "newsletter_deep_dive_v1");
    let raw = MockWriter::new()
        .generate(&spec.topic_context(), &spec.tone)
        .await
        .expect("mock writer never fails");
    compose_draft(&spec, &raw)
}

fn reading_grade(quality: &QualityGate, draft: &Draft) -> f64 {
    quality.review(draft).scores["reading_level_max_grade"]
}

#[tokio::test]
async fn test_long_plain_topic_stays_under_reading_ceiling() {
    let (quality, _) = gates();
    let draft = mock_draft(
        "How to help kids who read slowly keep up with their class at home and at school",
        "parents",
    )
    .await;

    assert!(reading_grade(&quality, &draft) < 12.0);
    assert!(quality.review(&draft).passed());
}

#[tokio::test]
async fn test_jargon_heavy_topic_exceeds_reading_ceiling() {
    let (quality, _) = gates();
    let draft = mock_draft(
        "Metacognitive strategies for interdisciplinary collaborative investigations",
        "undergraduate educational psychology researchers",
    )
    .await;

    let result = quality.review(&draft);
    assert!(reading_grade(&quality, &draft) > 12.0);
    assert_eq!(result.status, GateStatus::NeedsFix);
    assert!(result
        .issues
        .iter()
        .any(|issue| issue.code == "reading_level_max_grade" && issue.severity == Severity::Medium));
}
