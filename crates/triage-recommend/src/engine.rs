//! Keyword recommendation engine implementation.
//!
//! `KeywordRecommendationEngine` loads a `RecommendationConfig` from a TOML
//! string or file and implements the `RecommendationEngine` trait from
//! triage-core.
//!
//! Evaluation algorithm:
//!
//! 1. Lowercase every symptom text and join them with single spaces.
//! 2. The first keyword rule with a keyword in that text supplies the
//!    specialist, tests and precautions. No match → the default specialist
//!    with no tests and no precautions.
//! 3. The first timeframe whose `min_score` the score reaches supplies the
//!    timeframe. No match → the default timeframe.
//! 4. The reasoning sentence names the urgency level.

use std::path::Path;

use tracing::debug;

use triage_contracts::{
    error::{TriageError, TriageResult},
    intake::Symptom,
    outcome::{AiRecommendation, TriageScore, UrgencyLevel},
};
use triage_core::traits::RecommendationEngine;

use crate::rule::RecommendationConfig;

/// The embedded default recommendation rules.
pub const DEFAULT_RECOMMENDATION_RULES: &str = include_str!("../rules/recommendations.toml");

/// A `RecommendationEngine` driven by a TOML keyword table.
///
/// ```rust,ignore
/// use triage_recommend::KeywordRecommendationEngine;
///
/// let engine = KeywordRecommendationEngine::embedded()?;
/// let advice = engine.recommend(&symptoms, score, urgency);
/// ```
#[derive(Debug)]
pub struct KeywordRecommendationEngine {
    config: RecommendationConfig,
}

impl KeywordRecommendationEngine {
    /// Build an engine from the rules compiled into this crate.
    pub fn embedded() -> TriageResult<Self> {
        Self::from_toml_str(DEFAULT_RECOMMENDATION_RULES)
    }

    /// Parse `s` as TOML and build an engine.
    ///
    /// Returns `TriageError::ConfigError` if the TOML is malformed, does not
    /// match `RecommendationConfig`, or fails validation.
    pub fn from_toml_str(s: &str) -> TriageResult<Self> {
        let config: RecommendationConfig =
            toml::from_str(s).map_err(|e| TriageError::ConfigError {
                reason: format!("failed to parse recommendation TOML: {}", e),
            })?;
        config
            .validate()
            .map_err(|reason| TriageError::ConfigError { reason })?;
        Ok(Self { config })
    }

    /// Read the file at `path` and parse it as recommendation configuration.
    pub fn from_file(path: &Path) -> TriageResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| TriageError::ConfigError {
            reason: format!(
                "failed to read recommendation file '{}': {}",
                path.display(),
                e
            ),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn config(&self) -> &RecommendationConfig {
        &self.config
    }

    fn timeframe(&self, score: TriageScore) -> &str {
        self.config
            .timeframes
            .iter()
            .find(|t| score.value() >= t.min_score)
            .map_or(self.config.defaults.timeframe.as_str(), |t| t.label.as_str())
    }
}

impl RecommendationEngine for KeywordRecommendationEngine {
    fn recommend(
        &self,
        symptoms: &[Symptom],
        score: TriageScore,
        urgency: UrgencyLevel,
    ) -> AiRecommendation {
        let text = symptoms
            .iter()
            .map(|s| s.symptom.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");

        let defaults = &self.config.defaults;
        let reasoning = format!(
            "{}. Your triage score indicates {} priority care.",
            defaults.reasoning, urgency
        );
        let timeframe = self.timeframe(score).to_string();

        match self.config.rules.iter().find(|rule| rule.matches(&text)) {
            Some(rule) => {
                debug!(rule_id = %rule.id, specialist = %rule.specialist, "recommendation rule matched");
                AiRecommendation {
                    specialist_type: rule.specialist.clone(),
                    reasoning,
                    suggested_tests: rule.suggested_tests.clone(),
                    timeframe,
                    precautions: rule.precautions.clone(),
                }
            }
            None => {
                debug!(specialist = %defaults.specialist, "no recommendation rule matched; using default");
                AiRecommendation {
                    specialist_type: defaults.specialist.clone(),
                    reasoning,
                    suggested_tests: Vec::new(),
                    timeframe,
                    precautions: Vec::new(),
                }
            }
        }
    }
}
