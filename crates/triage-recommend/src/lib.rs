//! # triage-recommend
//!
//! A TOML-driven recommendation generator for completed triage sessions.
//!
//! [`KeywordRecommendationEngine`] implements the
//! [`RecommendationEngine`](triage_core::traits::RecommendationEngine) trait.
//! Keyword rules pick the specialist, tests and precautions; score thresholds
//! pick the timeframe. Both tables are evaluated in declaration order and the
//! first match wins, so a patient reporting chest pain and a headache is
//! routed to the cardiac rule because it is declared first.

pub mod engine;
pub mod rule;

pub use engine::{KeywordRecommendationEngine, DEFAULT_RECOMMENDATION_RULES};
pub use rule::{KeywordRule, RecommendationConfig, RecommendationDefaults, TimeframeRule};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use triage_contracts::{
        error::TriageError,
        intake::Symptom,
        outcome::{AiRecommendation, TriageScore, UrgencyLevel},
    };
    use triage_core::traits::RecommendationEngine;

    use crate::KeywordRecommendationEngine;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn recommend(texts: &[&str], score: u8) -> AiRecommendation {
        let engine = KeywordRecommendationEngine::embedded().unwrap();
        let symptoms: Vec<Symptom> = texts.iter().map(|t| Symptom::new(*t, 5)).collect();
        let score = TriageScore::new(score);
        engine.recommend(&symptoms, score, UrgencyLevel::from_score(score))
    }

    // ── 1. keyword rules ──────────────────────────────────────────────────────

    #[test]
    fn test_cardiac_rule() {
        let rec = recommend(&["Chest pain"], 8);
        assert_eq!(rec.specialist_type, "Cardiologist");
        assert_eq!(rec.suggested_tests, vec!["ECG", "Chest X-ray"]);
        assert_eq!(
            rec.precautions,
            vec!["Avoid strenuous activities", "Monitor chest pain"]
        );
    }

    #[test]
    fn test_chest_beats_headache() {
        let rec = recommend(&["headache", "chest pain"], 4);
        assert_eq!(rec.specialist_type, "Cardiologist");
    }

    #[test]
    fn test_each_specialist() {
        let cases = [
            ("racing HEART", "Cardiologist"),
            ("shortness of breathing", "Pulmonologist"),
            ("dry cough", "Pulmonologist"),
            ("upset stomach", "Gastroenterologist"),
            ("Nausea", "Gastroenterologist"),
            ("dizziness when standing", "Neurologist"),
            ("migraine headache", "Neurologist"),
        ];
        for (text, expected) in cases {
            assert_eq!(recommend(&[text], 5).specialist_type, expected, "for '{text}'");
        }
    }

    #[test]
    fn test_cough_beats_nausea() {
        let rec = recommend(&["nausea", "cough"], 5);
        assert_eq!(rec.specialist_type, "Pulmonologist");
        assert_eq!(rec.suggested_tests, vec!["Chest X-ray", "Pulmonary Function Test"]);
    }

    #[test]
    fn test_default_specialist_has_no_tests() {
        let rec = recommend(&["sprained ankle"], 2);
        assert_eq!(rec.specialist_type, "General Practitioner");
        assert!(rec.suggested_tests.is_empty());
        assert!(rec.precautions.is_empty());
    }

    #[test]
    fn test_no_symptoms_uses_default() {
        let rec = recommend(&[], 1);
        assert_eq!(rec.specialist_type, "General Practitioner");
        assert_eq!(rec.timeframe, "1-2 weeks");
    }

    // ── 2. timeframe and reasoning ────────────────────────────────────────────

    #[test]
    fn test_timeframe_by_score() {
        let expected = [
            (1, "1-2 weeks"),
            (2, "1-2 weeks"),
            (3, "1 week"),
            (4, "1 week"),
            (5, "2-3 days"),
            (6, "2-3 days"),
            (7, "Within 24 hours"),
            (10, "Within 24 hours"),
        ];
        for (score, timeframe) in expected {
            assert_eq!(recommend(&["fatigue"], score).timeframe, timeframe, "score {score}");
        }
    }

    #[test]
    fn test_reasoning_names_urgency() {
        let rec = recommend(&["chest pain"], 8);
        assert_eq!(
            rec.reasoning,
            "Based on your symptoms and assessment. Your triage score indicates critical priority care."
        );

        let rec = recommend(&["chest pain"], 9);
        assert!(rec.reasoning.contains("emergency priority care"));
    }

    #[test]
    fn test_recommendation_is_deterministic() {
        assert_eq!(recommend(&["cough", "fever"], 6), recommend(&["cough", "fever"], 6));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(recommend(&["cough"], 5)).unwrap();
        assert_eq!(json["specialistType"], "Pulmonologist");
        assert_eq!(json["suggestedTests"][1], "Pulmonary Function Test");
        assert_eq!(json["timeframe"], "2-3 days");
    }

    // ── 3. configuration ──────────────────────────────────────────────────────

    #[test]
    fn test_custom_rules() {
        let toml = r#"
            [defaults]
            specialist = "Family Physician"
            timeframe = "next available"
            reasoning = "Based on the intake"

            [[rules]]
            id = "skin"
            keywords = ["RASH"]
            specialist = "Dermatologist"
        "#;
        let engine = KeywordRecommendationEngine::from_toml_str(toml).unwrap();
        let score = TriageScore::new(9);

        let rec = engine.recommend(&[Symptom::new("itchy rash", 3)], score, UrgencyLevel::Emergency);
        assert_eq!(rec.specialist_type, "Dermatologist");
        assert_eq!(rec.timeframe, "next available");

        let rec = engine.recommend(&[Symptom::new("chest pain", 3)], score, UrgencyLevel::Emergency);
        assert_eq!(rec.specialist_type, "Family Physician");
    }

    #[test]
    fn test_toml_parse_error() {
        match KeywordRecommendationEngine::from_toml_str("[[rules]\nid = ") {
            Err(TriageError::ConfigError { reason }) => {
                assert!(
                    reason.contains("failed to parse recommendation TOML"),
                    "got: {reason}"
                );
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_unordered_timeframes_rejected() {
        let toml = r#"
            [defaults]
            specialist = "General Practitioner"
            timeframe = "1-2 weeks"
            reasoning = "Based on your symptoms and assessment"

            [[timeframes]]
            min_score = 3
            label = "1 week"

            [[timeframes]]
            min_score = 7
            label = "Within 24 hours"
        "#;
        match KeywordRecommendationEngine::from_toml_str(toml) {
            Err(TriageError::ConfigError { reason }) => {
                assert!(reason.contains("must come after"), "got: {reason}");
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_rule_without_keywords_rejected() {
        let toml = r#"
            [defaults]
            specialist = "General Practitioner"
            timeframe = "1-2 weeks"
            reasoning = "Based on your symptoms and assessment"

            [[rules]]
            id = "empty"
            keywords = []
            specialist = "Nobody"
        "#;
        assert!(matches!(
            KeywordRecommendationEngine::from_toml_str(toml),
            Err(TriageError::ConfigError { .. })
        ));
    }
}
