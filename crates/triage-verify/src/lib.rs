//! # triage-verify
//!
//! Validation at both ends of a triage session.
//!
//! - [`IntakeValidator`] checks raw JSON intake payloads against the built-in
//!   JSON Schemas before they are turned into typed updates.
//! - [`InvariantVerifier`] implements
//!   [`OutcomeVerifier`](triage_core::traits::OutcomeVerifier) and checks a
//!   computed outcome's shape and classification invariants before the
//!   session is completed.
//!
//! ```rust,ignore
//! use triage_contracts::{intake::Symptom, verify::IntakeKind};
//! use triage_verify::IntakeValidator;
//!
//! let symptoms: Vec<Symptom> = IntakeValidator::new().parse(IntakeKind::Symptoms, payload)?;
//! ```

pub mod intake;
pub mod outcome;
pub mod schema;

pub use intake::IntakeValidator;
pub use outcome::{CustomOutcomeRule, InvariantVerifier};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use serde_json::json;

    use triage_contracts::{
        error::TriageError,
        intake::{AssessmentAnswer, MedicalHistory, Symptom, VitalSigns},
        outcome::{AiRecommendation, Classification, RecommendedAction, TriageOutcome, TriageScore, UrgencyLevel},
        session::SessionId,
        verify::IntakeKind,
    };
    use triage_core::traits::OutcomeVerifier;

    use super::{IntakeValidator, InvariantVerifier};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn outcome(score: u8) -> TriageOutcome {
        TriageOutcome::new(
            SessionId::new(),
            Classification::from_score(TriageScore::new(score)),
            AiRecommendation {
                specialist_type: "General Practitioner".to_string(),
                reasoning: "Based on your symptoms and assessment.".to_string(),
                suggested_tests: vec![],
                timeframe: "1-2 weeks".to_string(),
                precautions: vec![],
            },
        )
    }

    fn rule_ids(outcome: &TriageOutcome) -> Vec<String> {
        InvariantVerifier::new()
            .verify(outcome)
            .unwrap()
            .failures
            .into_iter()
            .map(|f| f.rule_id)
            .collect()
    }

    // ── Intake: symptoms ──────────────────────────────────────────────────────

    #[test]
    fn test_symptoms_pass() {
        let payload = json!([
            { "symptom": "chest pain", "severity": 8, "duration": "2 hours", "frequency": "constant" },
            { "symptom": "nausea", "severity": 3 }
        ]);
        let report = IntakeValidator::new().validate(IntakeKind::Symptoms, &payload);
        assert!(report.passed, "failures: {:?}", report.failures);
    }

    #[test]
    fn test_symptoms_collects_every_failure() {
        let payload = json!([
            { "symptom": "chest pain", "severity": 11 },
            { "symptom": "", "severity": 2.5 },
            { "severity": 4 }
        ]);
        let report = IntakeValidator::new().validate(IntakeKind::Symptoms, &payload);

        assert!(!report.passed);
        assert!(report.failures.len() >= 4, "failures: {:?}", report.failures);
        assert!(report.failures.iter().all(|f| f.rule_id == "symptoms-schema"));
    }

    #[test]
    fn test_parse_symptoms() {
        let symptoms: Vec<Symptom> = IntakeValidator::new()
            .parse(
                IntakeKind::Symptoms,
                json!([{ "symptom": "cough", "severity": 4, "duration": "3 days" }]),
            )
            .unwrap();
        assert_eq!(symptoms.len(), 1);
        assert_eq!(symptoms[0].severity, 4);
        assert_eq!(symptoms[0].duration, "3 days");
    }

    #[test]
    fn test_parse_rejects_with_invalid_input() {
        let result: Result<Vec<Symptom>, _> = IntakeValidator::new()
            .parse(IntakeKind::Symptoms, json!({ "symptom": "cough" }));
        match result {
            Err(TriageError::InvalidInput { reason }) => {
                assert!(reason.starts_with("symptoms payload rejected"), "got: {reason}");
                assert!(reason.contains("[symptoms-schema]"), "got: {reason}");
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    // ── Intake: vitals, history, assessment ───────────────────────────────────

    #[test]
    fn test_vitals_pass_with_nulls() {
        let payload = json!({
            "temperature": 99.1,
            "bloodPressure": { "systolic": 120, "diastolic": null },
            "heartRate": null
        });
        let vitals: VitalSigns = IntakeValidator::new().parse(IntakeKind::Vitals, payload).unwrap();
        assert_eq!(vitals.temperature, Some(99.1));
        assert_eq!(vitals.systolic(), Some(120.0));
        assert_eq!(vitals.heart_rate, None);
    }

    #[test]
    fn test_vitals_reject_unknown_and_wrong_types() {
        let payload = json!({ "temprature": 99.1, "heartRate": "fast", "oxygenSaturation": 140 });
        let report = IntakeValidator::new().validate(IntakeKind::Vitals, &payload);
        assert!(!report.passed);
        assert_eq!(report.failures.len(), 3, "failures: {:?}", report.failures);
    }

    #[test]
    fn test_history_pass_and_fail() {
        let validator = IntakeValidator::new();

        let history: MedicalHistory = validator
            .parse(IntakeKind::History, json!({ "allergies": ["penicillin"] }))
            .unwrap();
        assert_eq!(history.allergies, Some(vec!["penicillin".to_string()]));

        let report = validator.validate(IntakeKind::History, &json!({ "allergies": "penicillin" }));
        assert!(!report.passed);
    }

    #[test]
    fn test_assessment_pass_and_fail() {
        let validator = IntakeValidator::new();

        let answers: Vec<AssessmentAnswer> = validator
            .parse(
                IntakeKind::Assessment,
                json!([{ "question": "Is the pain worsening?", "answer": "yes", "weight": 7 }]),
            )
            .unwrap();
        assert_eq!(answers[0].weight, 7.0);

        let report = validator.validate(
            IntakeKind::Assessment,
            &json!([{ "question": "Fever?", "answer": "yes", "weight": "high" }]),
        );
        assert!(!report.passed);
        assert_eq!(report.failures[0].rule_id, "assessment-schema");
    }

    #[test]
    fn test_every_intake_schema_compiles() {
        let validator = IntakeValidator::new();
        for kind in IntakeKind::ALL {
            let report = validator.validate(kind, &json!(null));
            assert!(
                report.failures.iter().all(|f| !f.message.contains("invalid JSON Schema")),
                "schema for {kind} does not compile"
            );
        }
    }

    // ── Outcome verification ──────────────────────────────────────────────────

    #[test]
    fn test_consistent_outcomes_pass() {
        for score in 1..=10 {
            assert!(rule_ids(&outcome(score)).is_empty(), "score {score} should pass");
        }
    }

    #[test]
    fn test_urgency_mismatch_detected() {
        let mut o = outcome(8);
        o.urgency_level = UrgencyLevel::Low;

        let ids = rule_ids(&o);
        assert!(ids.contains(&"urgency-matches-score".to_string()));
        assert!(ids.contains(&"action-matches-urgency".to_string()));
    }

    #[test]
    fn test_emergency_flag_mismatch_detected() {
        let mut o = outcome(9);
        o.is_emergency = false;
        assert_eq!(rule_ids(&o), vec!["emergency-flag".to_string()]);

        let mut o = outcome(3);
        o.is_emergency = true;
        assert_eq!(rule_ids(&o), vec!["emergency-flag".to_string()]);
    }

    #[test]
    fn test_action_mismatch_detected() {
        let mut o = outcome(5);
        o.recommended_action = RecommendedAction::SelfCare;
        assert_eq!(rule_ids(&o), vec!["action-matches-urgency".to_string()]);
    }

    #[test]
    fn test_blank_recommendation_fails_schema() {
        let mut o = outcome(4);
        o.ai_recommendation.specialist_type.clear();

        let report = InvariantVerifier::new().verify(&o).unwrap();
        assert!(!report.passed);
        assert_eq!(report.failures[0].rule_id, "outcome-schema");
    }

    #[test]
    fn test_custom_rule() {
        let mut verifier = InvariantVerifier::new();
        verifier.register_rule(
            "emergency-needs-precautions",
            Box::new(|o: &TriageOutcome| {
                (o.is_emergency && o.ai_recommendation.precautions.is_empty())
                    .then(|| "emergency outcome lists no precautions".to_string())
            }),
        );

        assert!(verifier.verify(&outcome(6)).unwrap().passed);

        let report = verifier.verify(&outcome(10)).unwrap();
        assert!(!report.passed);
        assert_eq!(report.failures[0].rule_id, "emergency-needs-precautions");

        // Re-registering replaces the earlier rule.
        verifier.register_rule("emergency-needs-precautions", Box::new(|_: &TriageOutcome| None));
        assert!(verifier.verify(&outcome(10)).unwrap().passed);
    }
}
