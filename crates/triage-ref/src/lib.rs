//! # triage-ref
//!
//! Reference runtime for the triage session service.
//!
//! Wires the real engines, session store, audit log and verifier together
//! and runs them over fictional intakes:
//!
//! 1. **Worked example**: critical chest pain, completed once and referred.
//! 2. **Emergency**: a score of 9 flags an emergency and is escalated.
//! 3. **Concurrent completion**: racing completions score a session once.
//!
//! Intake documents in JSON can also be validated and run as a session.
//! No external systems are contacted.

pub mod intake;
pub mod mock_data;
pub mod runtime;
pub mod scenarios;

pub use intake::Intake;
pub use runtime::{RuleSources, Runtime};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use triage_contracts::{
        error::TriageError,
        outcome::{RecommendedAction, UrgencyLevel},
        session::SessionStatus,
    };
    use triage_core::traits::SessionStore;

    use crate::{
        mock_data,
        scenarios::{concurrent_complete, emergency, intake_file, worked_example},
        Intake, RuleSources, Runtime,
    };

    fn runtime() -> Runtime {
        Runtime::build(&RuleSources::default(), "ref-tests").unwrap()
    }

    // ── Mock intakes through the real stack ───────────────────────────────────

    #[test]
    fn test_worked_example_outcome() {
        let rt = runtime();
        let intake = mock_data::worked_example();
        let id = intake.submit(&rt.service).unwrap();

        let outcome = rt.service.complete(&id, &intake.patient_id).unwrap();
        assert_eq!(outcome.triage_score.value(), 8);
        assert_eq!(outcome.urgency_level, UrgencyLevel::Critical);
        assert_eq!(outcome.recommended_action, RecommendedAction::SeekImmediateCare);
        assert!(!outcome.is_emergency);
        assert_eq!(outcome.ai_recommendation.specialist_type, "Cardiologist");
        assert_eq!(outcome.ai_recommendation.timeframe, "Within 24 hours");
    }

    #[test]
    fn test_emergency_outcome() {
        let rt = runtime();
        let intake = mock_data::emergency();
        let id = intake.submit(&rt.service).unwrap();

        let outcome = rt.service.complete(&id, &intake.patient_id).unwrap();
        assert_eq!(outcome.triage_score.value(), 9);
        assert!(outcome.is_emergency);
        assert_eq!(outcome.recommended_action, RecommendedAction::CallEmergencyServices);

        let escalated = rt.service.escalate(&id, &intake.patient_id).unwrap();
        assert_eq!(escalated.status, SessionStatus::EmergencyEscalated);
    }

    #[test]
    fn test_routine_outcome() {
        let rt = runtime();
        let intake = mock_data::routine_cough();
        let id = intake.submit(&rt.service).unwrap();

        let outcome = rt.service.complete(&id, &intake.patient_id).unwrap();
        assert_eq!(outcome.triage_score.value(), 2);
        assert_eq!(outcome.urgency_level, UrgencyLevel::Low);
        assert_eq!(outcome.ai_recommendation.specialist_type, "Pulmonologist");
        assert_eq!(outcome.ai_recommendation.timeframe, "1-2 weeks");

        let stored = rt.store.get(&id).unwrap().unwrap();
        assert_eq!(stored.vital_signs.respiratory_rate, Some(16.0));
        assert_eq!(
            stored.medical_history.allergies,
            Some(vec!["penicillin".to_string()])
        );
    }

    // ── Intake documents ──────────────────────────────────────────────────────

    #[test]
    fn test_sample_intake_document() {
        let intake = Intake::from_json(mock_data::SAMPLE_INTAKE_JSON).unwrap();
        assert_eq!(intake.symptoms.len(), 2);
        assert_eq!(intake.vital_signs.systolic(), Some(150.0));

        let outcome = intake_file::run_intake(&RuleSources::default(), &intake).unwrap();
        assert_eq!(outcome.triage_score.value(), 5);
        assert_eq!(outcome.urgency_level, UrgencyLevel::High);
        assert_eq!(outcome.ai_recommendation.specialist_type, "Neurologist");
        assert_eq!(outcome.ai_recommendation.timeframe, "2-3 days");
    }

    #[test]
    fn test_minimal_intake_document() {
        let intake = Intake::from_json(r#"{ "patientId": "patient-9000" }"#).unwrap();
        assert!(intake.symptoms.is_empty());

        let outcome = intake_file::run_intake(&RuleSources::default(), &intake).unwrap();
        assert_eq!(outcome.triage_score.value(), 1);
        assert_eq!(outcome.ai_recommendation.specialist_type, "General Practitioner");
    }

    #[test]
    fn test_invalid_intake_reports_every_section() {
        let text = r#"{
            "patientId": "patient-9001",
            "symptoms": [{ "symptom": "cough", "severity": 42 }],
            "vitalSigns": { "heartRate": "fast" },
            "assessmentAnswers": [{ "question": "q", "answer": "a", "weight": 3 }]
        }"#;

        match Intake::from_json(text) {
            Err(TriageError::InvalidInput { reason }) => {
                assert!(reason.contains("[symptoms-schema]"), "got: {reason}");
                assert!(reason.contains("[vitals-schema]"), "got: {reason}");
                assert!(!reason.contains("[assessment-schema]"), "got: {reason}");
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_patient_rejected() {
        assert!(matches!(
            Intake::from_json(r#"{ "patientId": "  " }"#),
            Err(TriageError::InvalidInput { .. })
        ));
        assert!(matches!(
            Intake::from_json("not json"),
            Err(TriageError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_missing_intake_file() {
        let result = intake_file::run_file(
            &RuleSources::default(),
            &PathBuf::from("/nonexistent/intake.json"),
        );
        assert!(matches!(result, Err(TriageError::InvalidInput { .. })));
    }

    #[test]
    fn test_missing_rule_file() {
        let rules = RuleSources {
            scoring: Some(PathBuf::from("/nonexistent/scoring.toml")),
            recommendations: None,
        };
        assert!(matches!(
            Runtime::build(&rules, "bad-rules"),
            Err(TriageError::ConfigError { .. })
        ));
    }

    // ── Scenario runners ──────────────────────────────────────────────────────

    #[test]
    fn test_scenarios_run() {
        let rules = RuleSources::default();
        worked_example::run_scenario(&rules).unwrap();
        emergency::run_scenario(&rules).unwrap();
        concurrent_complete::run_scenario(&rules).unwrap();
    }
}
