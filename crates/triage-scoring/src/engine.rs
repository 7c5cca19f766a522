//! Weighted scoring engine implementation.
//!
//! `WeightedScoringEngine` loads a `ScoringConfig` from a TOML string or file
//! and implements the `ScoringEngine` trait from triage-core.
//!
//! Scoring algorithm:
//!
//! 1. Symptoms: mean severity × symptom weight (0 when there are none).
//! 2. Vitals: for each configured vital that was supplied, the points of the
//!    first band it crosses (or the rule's normal points); the mean over the
//!    supplied vitals only × vitals weight (0 when none were supplied).
//! 3. Assessment: mean answer weight × assessment weight (0 when empty).
//! 4. Sum in that order, round half up, clamp to [1, 10].

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use triage_contracts::{
    error::{TriageError, TriageResult},
    intake::{AssessmentAnswer, Symptom, VitalSigns},
    outcome::TriageScore,
};
use triage_core::traits::ScoringEngine;

use crate::rule::ScoringConfig;

/// The embedded default scoring rules.
pub const DEFAULT_SCORING_RULES: &str = include_str!("../rules/scoring.toml");

/// Each weighted component of a score, plus the unrounded sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub symptoms: f64,
    pub vitals: f64,
    pub assessment: f64,
    pub raw: f64,
    pub score: TriageScore,
}

/// A `ScoringEngine` driven by a TOML weight and vital-band table.
///
/// ```rust,ignore
/// use triage_scoring::WeightedScoringEngine;
///
/// let engine = WeightedScoringEngine::embedded()?;
/// let score = engine.score(&symptoms, &vitals, &answers);
/// ```
#[derive(Debug)]
pub struct WeightedScoringEngine {
    config: ScoringConfig,
}

impl WeightedScoringEngine {
    /// Build an engine from the rules compiled into this crate.
    pub fn embedded() -> TriageResult<Self> {
        Self::from_toml_str(DEFAULT_SCORING_RULES)
    }

    /// Parse `s` as TOML and build an engine.
    ///
    /// Returns `TriageError::ConfigError` if the TOML is malformed, does not
    /// match `ScoringConfig`, or fails `ScoringConfig::validate`.
    pub fn from_toml_str(s: &str) -> TriageResult<Self> {
        let config: ScoringConfig = toml::from_str(s).map_err(|e| TriageError::ConfigError {
            reason: format!("failed to parse scoring TOML: {}", e),
        })?;
        Self::from_config(config)
    }

    /// Read the file at `path` and parse it as scoring configuration.
    pub fn from_file(path: &Path) -> TriageResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| TriageError::ConfigError {
            reason: format!("failed to read scoring file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_config(config: ScoringConfig) -> TriageResult<Self> {
        config
            .validate()
            .map_err(|reason| TriageError::ConfigError { reason })?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Compute every component and the final score.
    pub fn breakdown(
        &self,
        symptoms: &[Symptom],
        vitals: &VitalSigns,
        answers: &[AssessmentAnswer],
    ) -> ScoreBreakdown {
        let weights = self.config.weights;

        let symptom_component = mean(symptoms.iter().map(|s| f64::from(s.severity)))
            .map_or(0.0, |avg| avg * weights.symptoms);

        let vital_component = mean(self.config.vitals.iter().filter_map(|rule| {
            let value = rule.sign.read(vitals)?;
            let points = rule.points_for(value);
            debug!(
                sign = ?rule.sign,
                value,
                band = rule.band_for(value).map_or("normal", |b| b.label.as_str()),
                points,
                "vital sign scored"
            );
            Some(points)
        }))
        .map_or(0.0, |avg| avg * weights.vitals);

        let assessment_component = mean(answers.iter().map(|a| a.weight))
            .map_or(0.0, |avg| avg * weights.assessment);

        let raw = symptom_component + vital_component + assessment_component;
        let score = TriageScore::from_raw(raw);

        debug!(
            symptoms = symptom_component,
            vitals = vital_component,
            assessment = assessment_component,
            raw,
            score = score.value(),
            "triage score computed"
        );

        ScoreBreakdown {
            symptoms: symptom_component,
            vitals: vital_component,
            assessment: assessment_component,
            raw,
            score,
        }
    }
}

impl ScoringEngine for WeightedScoringEngine {
    fn score(
        &self,
        symptoms: &[Symptom],
        vitals: &VitalSigns,
        answers: &[AssessmentAnswer],
    ) -> TriageScore {
        self.breakdown(symptoms, vitals, answers).score
    }
}

/// Arithmetic mean, or `None` for an empty sequence.
fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}
