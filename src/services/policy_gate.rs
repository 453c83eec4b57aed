//! Policy/safety gate.
//!
//! Matches forbidden-term and PII patterns against the draft text and, when
//! an affiliate-style term appears without a matching disclosure, asks for a
//! disclosure to be appended. That request is returned as a [`DraftPatch`]
//! instead of being written into the draft under review.

use regex::{Regex, RegexBuilder};
use std::collections::BTreeMap;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    Draft, DraftPatch, GateOutcome, GateResult, Issue, PolicyConfig, Workstream,
};

pub const FORBIDDEN: &str = "forbidden";
pub const PII: &str = "pii";
pub const AFFILIATE_DISCLOSURE: &str = "affiliate_disclosure";

#[derive(Debug, Clone)]
struct CompiledRules {
    forbidden: Vec<Regex>,
    pii: Vec<Regex>,
}

/// Policy gate with patterns compiled once per workstream.
#[derive(Debug, Clone)]
pub struct PolicyGate {
    rules: BTreeMap<Workstream, CompiledRules>,
    affiliate_term: String,
    disclosure: String,
}

impl PolicyGate {
    pub fn new(config: &PolicyConfig) -> DomainResult<Self> {
        let mut rules = BTreeMap::new();
        for workstream in Workstream::ALL {
            let merged = config.rules_for(workstream);
            rules.insert(
                workstream,
                CompiledRules {
                    forbidden: compile_all(&merged.forbidden)?,
                    pii: compile_all(&merged.pii)?,
                },
            );
        }
        Ok(Self {
            rules,
            affiliate_term: config.affiliate_term.to_lowercase(),
            disclosure: config.disclosure.clone(),
        })
    }

    /// Review a draft for a workstream.
    ///
    /// Status is `pass` iff no pattern matched; a requested disclosure does
    /// not count as an issue.
    pub fn review(&self, workstream: Workstream, draft: &Draft) -> GateOutcome {
        let mut issues = Vec::new();
        if let Some(rules) = self.rules.get(&workstream) {
            issues.extend(matches(&rules.forbidden, &draft.text, FORBIDDEN));
            issues.extend(matches(&rules.pii, &draft.text, PII));
        }

        let mut patches = Vec::new();
        let mut auto_fixes = Vec::new();
        if self.needs_disclosure(draft) {
            patches.push(DraftPatch::AppendDisclosure(self.disclosure.clone()));
            auto_fixes.push(AFFILIATE_DISCLOSURE.to_string());
        }

        GateOutcome {
            result: GateResult::from_issues(issues).with_auto_fixes(auto_fixes),
            patches,
        }
    }

    fn needs_disclosure(&self, draft: &Draft) -> bool {
        draft.text.to_lowercase().contains(&self.affiliate_term)
            && !draft.metadata.disclosures.join(" ").contains(&self.affiliate_term)
    }
}

fn compile_all(patterns: &[String]) -> DomainResult<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| DomainError::ValidationFailed(format!("invalid policy pattern {pattern:?}: {e}")))
        })
        .collect()
}

fn matches(patterns: &[Regex], text: &str, code: &str) -> Vec<Issue> {
    patterns
        .iter()
        .filter(|re| re.is_match(text))
        .map(|re| Issue::high(code, re.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{GateStatus, PolicyOverride, Severity};

    fn gate() -> PolicyGate {
        PolicyGate::new(&PolicyConfig::default()).unwrap()
    }

    #[test]
    fn test_flags_pii_and_forbidden() {
        let draft = Draft::new("Email me at test@example.com for a GUARANTEE!");
        let outcome = gate().review(Workstream::Newsletter, &draft);
        assert_eq!(outcome.result.status, GateStatus::NeedsFix);

        let codes: Vec<&str> = outcome.result.issues.iter().map(|i| i.code.as_str()).collect();
        assert!(codes.contains(&FORBIDDEN));
        assert!(codes.contains(&PII));
        assert!(outcome.result.issues.iter().all(|i| i.severity == Severity::High));
    }

    #[test]
    fn test_clean_text_passes() {
        let outcome = gate().review(Workstream::XPost, &Draft::new("Spaced practice helps."));
        assert!(outcome.result.passed());
        assert!(outcome.patches.is_empty());
    }

    #[test]
    fn test_affiliate_term_requests_one_disclosure() {
        let draft = Draft::new("Check this Affiliate link");
        let outcome = gate().review(Workstream::Newsletter, &draft);

        assert!(outcome.result.passed());
        assert_eq!(outcome.result.auto_fixes_applied, vec![AFFILIATE_DISCLOSURE.to_string()]);
        assert_eq!(outcome.patches.len(), 1);
        assert!(draft.metadata.disclosures.is_empty(), "input draft must not change");

        let patched = draft.patched(&outcome.patches);
        assert_eq!(patched.metadata.disclosures.len(), 1);
        assert!(patched.metadata.disclosures[0].to_lowercase().contains("affiliate"));

        let second = gate().review(Workstream::Newsletter, &patched);
        assert!(second.patches.is_empty());
        assert!(second.result.auto_fixes_applied.is_empty());
    }

    #[test]
    fn test_existing_disclosure_is_respected() {
        let draft = Draft::new("affiliate offer")
            .with_disclosures(vec!["Contains affiliate links.".to_string()]);
        let outcome = gate().review(Workstream::Medium, &draft);
        assert!(outcome.patches.is_empty());
    }

    #[test]
    fn test_workstream_override_replaces_common_list() {
        let mut config = PolicyConfig::default();
        config.workstreams.insert(
            "tpt".to_string(),
            PolicyOverride {
                forbidden: Some(vec!["homework answers".to_string()]),
                pii: None,
            },
        );
        let gate = PolicyGate::new(&config).unwrap();

        let outcome = gate.review(Workstream::Tpt, &Draft::new("A guarantee of homework answers"));
        assert_eq!(outcome.result.issues.len(), 1);
        assert_eq!(outcome.result.issues[0].message, "homework answers");

        let outcome = gate.review(Workstream::XPost, &Draft::new("A guarantee of homework answers"));
        assert_eq!(outcome.result.issues.len(), 1);
        assert_eq!(outcome.result.issues[0].code, FORBIDDEN);
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let mut config = PolicyConfig::default();
        config.common.forbidden.push("(unclosed".to_string());
        assert!(matches!(
            PolicyGate::new(&config),
            Err(DomainError::ValidationFailed(_))
        ));
    }
}
