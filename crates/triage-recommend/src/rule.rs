//! Recommendation rule types and configuration schema.
//!
//! A `RecommendationConfig` is deserialized from TOML and holds the fallback
//! values, an ordered list of keyword rules and an ordered list of timeframe
//! thresholds. Both lists are evaluated in declaration order and the first
//! match wins.

use serde::{Deserialize, Serialize};

/// Values used when no keyword rule matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationDefaults {
    pub specialist: String,

    /// Timeframe for scores below every `TimeframeRule::min_score`.
    pub timeframe: String,

    /// Opening clause of the reasoning sentence; the urgency clause is
    /// appended by the engine.
    pub reasoning: String,
}

/// A single keyword rule loaded from TOML.
///
/// ```toml
/// [[rules]]
/// id = "cardiac"
/// keywords = ["chest", "heart"]
/// specialist = "Cardiologist"
/// suggested_tests = ["ECG", "Chest X-ray"]
/// precautions = ["Avoid strenuous activities"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordRule {
    /// Stable identifier used in debug logs and error messages.
    pub id: String,

    #[serde(default)]
    pub description: String,

    /// Case-insensitive substrings. Any one of them occurring in the symptom
    /// text matches the rule.
    pub keywords: Vec<String>,

    pub specialist: String,

    #[serde(default)]
    pub suggested_tests: Vec<String>,

    #[serde(default)]
    pub precautions: Vec<String>,
}

impl KeywordRule {
    /// Return true if any keyword occurs in `text`.
    ///
    /// `text` must already be lowercased.
    pub fn matches(&self, text: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| text.contains(keyword.to_lowercase().as_str()))
    }
}

/// Maps a minimum triage score to a follow-up timeframe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeframeRule {
    pub min_score: u8,
    pub label: String,
}

/// The top-level structure deserialized from a TOML recommendation file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    pub defaults: RecommendationDefaults,

    /// Ordered keyword rules. First match wins.
    #[serde(default)]
    pub rules: Vec<KeywordRule>,

    /// Ordered timeframe thresholds, highest `min_score` first.
    #[serde(default)]
    pub timeframes: Vec<TimeframeRule>,
}

impl RecommendationConfig {
    /// Check what serde cannot. Returns a description of the first problem.
    pub fn validate(&self) -> Result<(), String> {
        let mut ids: Vec<&str> = Vec::new();
        for rule in &self.rules {
            if ids.contains(&rule.id.as_str()) {
                return Err(format!("rule id '{}' is declared more than once", rule.id));
            }
            ids.push(&rule.id);

            if rule.keywords.is_empty() || rule.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(format!("rule '{}' needs at least one non-blank keyword", rule.id));
            }
            if rule.specialist.trim().is_empty() {
                return Err(format!("rule '{}' has a blank specialist", rule.id));
            }
        }

        // A lower threshold listed first would shadow every higher one.
        for pair in self.timeframes.windows(2) {
            if pair[0].min_score <= pair[1].min_score {
                return Err(format!(
                    "timeframe '{}' (min_score {}) must come after '{}' (min_score {})",
                    pair[0].label, pair[0].min_score, pair[1].label, pair[1].min_score
                ));
            }
        }
        Ok(())
    }
}
