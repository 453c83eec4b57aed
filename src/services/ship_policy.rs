//! Ship decision policy.

use crate::domain::models::{GateResult, ShipDecision};

/// Publish iff both gates passed; otherwise send the draft back for revision.
///
/// `Discard` and `AbTest` are not produced by this policy.
pub fn decide_ship(quality: &GateResult, policy: &GateResult) -> ShipDecision {
    if quality.passed() && policy.passed() {
        ShipDecision::Publish
    } else {
        ShipDecision::Revise
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Issue;

    fn pass() -> GateResult {
        GateResult::from_issues(vec![])
    }

    fn fail(code: &str) -> GateResult {
        GateResult::from_issues(vec![Issue::medium(code, "x")])
    }

    #[test]
    fn test_publish_iff_both_pass() {
        assert_eq!(decide_ship(&pass(), &pass()), ShipDecision::Publish);
        assert_eq!(decide_ship(&fail("q"), &pass()), ShipDecision::Revise);
        assert_eq!(decide_ship(&pass(), &fail("pii")), ShipDecision::Revise);
        assert_eq!(decide_ship(&fail("q"), &fail("pii")), ShipDecision::Revise);
    }

    #[test]
    fn test_discard_and_ab_test_are_unreachable() {
        let results = [pass(), fail("a")];
        for quality in &results {
            for policy in &results {
                let decision = decide_ship(quality, policy);
                assert!(
                    !matches!(decision, ShipDecision::Discard | ShipDecision::AbTest(_)),
                    "policy produced {decision}"
                );
            }
        }
    }
}
