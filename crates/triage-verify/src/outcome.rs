//! Outcome verification before a completion is persisted.
//!
//! `InvariantVerifier` implements the `OutcomeVerifier` trait from
//! triage-core in two phases:
//!
//! 1. **Structural**: the serialized outcome is validated against
//!    `outcome_schema()`.
//! 2. **Semantic**: the classification invariants are re-derived from the
//!    score and compared, then any registered custom rules run.
//!
//! All failures are collected before returning.

use tracing::{debug, warn};

use triage_contracts::{
    error::{TriageError, TriageResult},
    outcome::{TriageOutcome, TriageScore, UrgencyLevel},
    verify::{VerificationFailure, VerificationReport},
};
use triage_core::traits::OutcomeVerifier;

use crate::{intake::schema_failures, schema::outcome_schema};

/// A caller-supplied check. Returns `Some(message)` on failure.
pub type CustomOutcomeRule = Box<dyn Fn(&TriageOutcome) -> Option<String> + Send + Sync>;

/// Checks structural shape and classification invariants of an outcome.
pub struct InvariantVerifier {
    custom_rules: Vec<(String, CustomOutcomeRule)>,
}

impl InvariantVerifier {
    pub fn new() -> Self {
        Self {
            custom_rules: Vec::new(),
        }
    }

    /// Register an extra check, evaluated after the built-in ones in
    /// registration order. Registering an existing `rule_id` replaces it.
    pub fn register_rule(&mut self, rule_id: impl Into<String>, rule: CustomOutcomeRule) {
        let rule_id = rule_id.into();
        match self.custom_rules.iter_mut().find(|(id, _)| *id == rule_id) {
            Some(slot) => slot.1 = rule,
            None => self.custom_rules.push((rule_id, rule)),
        }
    }

    fn semantic_failures(outcome: &TriageOutcome) -> Vec<VerificationFailure> {
        let mut failures = Vec::new();
        let score = outcome.triage_score.value();

        if !(TriageScore::MIN..=TriageScore::MAX).contains(&score) {
            failures.push(VerificationFailure::new(
                "score-range",
                format!("triage score {score} is outside 1..=10"),
            ));
        }

        let expected_urgency = UrgencyLevel::from_score(outcome.triage_score);
        if outcome.urgency_level != expected_urgency {
            failures.push(VerificationFailure::new(
                "urgency-matches-score",
                format!(
                    "score {score} maps to '{expected_urgency}' but outcome says '{}'",
                    outcome.urgency_level
                ),
            ));
        }

        let expected_action = outcome.urgency_level.recommended_action();
        if outcome.recommended_action != expected_action {
            failures.push(VerificationFailure::new(
                "action-matches-urgency",
                format!(
                    "urgency '{}' requires '{expected_action}' but outcome says '{}'",
                    outcome.urgency_level, outcome.recommended_action
                ),
            ));
        }

        let emergency_tier = outcome.urgency_level == UrgencyLevel::Emergency;
        if outcome.is_emergency != emergency_tier || outcome.is_emergency != (score >= 9) {
            failures.push(VerificationFailure::new(
                "emergency-flag",
                format!(
                    "isEmergency={} disagrees with urgency '{}' and score {score}",
                    outcome.is_emergency, outcome.urgency_level
                ),
            ));
        }

        failures
    }
}

impl Default for InvariantVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl OutcomeVerifier for InvariantVerifier {
    fn verify(&self, outcome: &TriageOutcome) -> TriageResult<VerificationReport> {
        let payload = serde_json::to_value(outcome).map_err(|e| TriageError::VerificationFailed {
            reason: format!("failed to serialize outcome: {}", e),
        })?;

        let mut failures = schema_failures("outcome-schema", &outcome_schema(), &payload);
        failures.extend(Self::semantic_failures(outcome));

        for (rule_id, rule) in &self.custom_rules {
            debug!(rule_id = %rule_id, "evaluating custom outcome rule");
            if let Some(message) = rule(outcome) {
                warn!(rule_id = %rule_id, %message, "custom outcome rule failed");
                failures.push(VerificationFailure::new(rule_id.as_str(), message));
            }
        }

        let report = VerificationReport::from_failures(failures);
        debug!(
            session_id = %outcome.session_id,
            passed = report.passed,
            failure_count = report.failures.len(),
            "outcome verification complete"
        );
        Ok(report)
    }
}
