//! Pedagogical quality gate.
//!
//! Scores a draft's text against a small set of cues and checks each score
//! against the configured rule list. Evaluation is pure: the gate never
//! changes the draft and never errors.

use std::collections::BTreeMap;

use crate::domain::models::{Draft, GateResult, Issue, QualityGateConfig, QualityRule};

pub const LEARNING_GOAL_PRESENT: &str = "learning_goal_present";
pub const COGNITIVE_PROGRESSION: &str = "cognitive_progression";
pub const RETRIEVAL_PRESENCE: &str = "retrieval_presence";
pub const READING_LEVEL_MAX_GRADE: &str = "reading_level_max_grade";
pub const UDL_ACCESSIBILITY: &str = "udl_accessibility";
pub const CLAIMS_SOFTENED_OR_CITED: &str = "claims_softened_or_cited";

const PROGRESSION_CUES: [&str; 3] = ["remember", "understand", "apply"];

/// Quality/pedagogy gate over a fixed rule list.
#[derive(Debug, Clone)]
pub struct QualityGate {
    rules: Vec<QualityRule>,
}

impl QualityGate {
    pub fn new(config: &QualityGateConfig) -> Self {
        Self {
            rules: config.rules.clone(),
        }
    }

    pub fn rules(&self) -> &[QualityRule] {
        &self.rules
    }

    /// Compute the named cue scores for a text.
    pub fn score(text: &str) -> BTreeMap<String, f64> {
        let lower = text.to_lowercase();
        let flag = |present: bool, value: f64| if present { value } else { 0.0 };

        BTreeMap::from([
            (LEARNING_GOAL_PRESENT.to_string(), flag(lower.contains("learn"), 1.0)),
            (
                COGNITIVE_PROGRESSION.to_string(),
                flag(PROGRESSION_CUES.iter().all(|cue| lower.contains(cue)), 0.7),
            ),
            (RETRIEVAL_PRESENCE.to_string(), lower.matches('?').count() as f64),
            (READING_LEVEL_MAX_GRADE.to_string(), reading_grade(text)),
            (
                UDL_ACCESSIBILITY.to_string(),
                flag(lower.contains("example") || lower.contains("recap"), 0.7),
            ),
            (
                CLAIMS_SOFTENED_OR_CITED.to_string(),
                flag(
                    lower.contains("may") || lower.contains("might") || lower.contains("http"),
                    1.0,
                ),
            ),
        ])
    }

    /// Review a draft. Status is `pass` iff no rule emitted an issue.
    pub fn review(&self, draft: &Draft) -> GateResult {
        let scores = Self::score(&draft.text);
        let issues = self
            .rules
            .iter()
            .flat_map(|rule| check_rule(rule, scores.get(&rule.key).copied().unwrap_or(0.0)))
            .collect();

        GateResult::from_issues(issues).with_scores(scores)
    }
}

fn check_rule(rule: &QualityRule, value: f64) -> Vec<Issue> {
    let mut issues = Vec::new();
    if rule.required && value == 0.0 {
        issues.push(Issue::high(&rule.key, "missing"));
    }
    if let Some(min) = rule.min {
        if value < min {
            issues.push(Issue::medium(&rule.key, format!("below min ({value} < {min})")));
        }
    }
    if let Some(max) = rule.max {
        if value > max {
            issues.push(Issue::medium(&rule.key, format!("above max ({value} > {max})")));
        }
    }
    issues
}

/// Flesch-Kincaid grade estimate, rounded to one decimal and floored at 0.
fn reading_grade(text: &str) -> f64 {
    let words: Vec<&str> = text
        .split_whitespace()
        .filter(|w| w.chars().any(char::is_alphabetic))
        .collect();
    if words.is_empty() {
        return 0.0;
    }
    let sentences = text
        .split(['.', '!', '?'])
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .count()
        .max(1);
    let syllables: usize = words.iter().map(|w| syllable_count(w)).sum();

    let word_count = words.len() as f64;
    let grade = 0.39 * (word_count / sentences as f64) + 11.8 * (syllables as f64 / word_count) - 15.59;
    (grade.max(0.0) * 10.0).round() / 10.0
}

/// Vowel-group heuristic with a silent trailing `e`.
fn syllable_count(word: &str) -> usize {
    let letters: Vec<char> = word
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');

    let mut count = 0;
    let mut previous_vowel = false;
    for &c in &letters {
        let vowel = is_vowel(c);
        if vowel && !previous_vowel {
            count += 1;
        }
        previous_vowel = vowel;
    }
    if count > 1 && letters.ends_with(&['e']) && !letters.ends_with(&['l', 'e']) {
        count -= 1;
    }
    count.max(1)
}
