//! Score, urgency classification and recommendation types.
//!
//! `TriageScore` owns the [1, 10] range invariant: there is no way to build
//! one outside that range. `Classification::from_score` is the single place
//! where a score is mapped to an urgency tier, an action and the emergency
//! flag, so the emergency equivalence holds by construction.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::session::SessionId;

/// An integer triage score, always within `[TriageScore::MIN, TriageScore::MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TriageScore(u8);

impl TriageScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Build a score, clamping `value` into range.
    pub fn new(value: u8) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// Round a raw weighted sum to the nearest integer and clamp it.
    ///
    /// Halves round up. A NaN sum yields the minimum score and infinities
    /// saturate, so garbage upstream can never break the range.
    pub fn from_raw(raw: f64) -> Self {
        let rounded = (raw + 0.5).floor();
        if rounded.is_nan() {
            return Self(Self::MIN);
        }
        Self(rounded.clamp(f64::from(Self::MIN), f64::from(Self::MAX)) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for TriageScore {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u8> for TriageScore {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(format!(
                "triage score {value} outside {}..={}",
                Self::MIN,
                Self::MAX
            ))
        }
    }
}

impl From<TriageScore> for u8 {
    fn from(score: TriageScore) -> Self {
        score.0
    }
}

impl fmt::Display for TriageScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordinal urgency tier. Variants are declared from least to most urgent.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum UrgencyLevel {
    #[default]
    Low,
    Medium,
    High,
    Critical,
    Emergency,
}

impl UrgencyLevel {
    /// Map a score to its tier, checking the most urgent band first.
    pub fn from_score(score: TriageScore) -> Self {
        match score.value() {
            9..=u8::MAX => Self::Emergency,
            7..=8 => Self::Critical,
            5..=6 => Self::High,
            3..=4 => Self::Medium,
            _ => Self::Low,
        }
    }

    pub fn recommended_action(self) -> RecommendedAction {
        match self {
            Self::Emergency => RecommendedAction::CallEmergencyServices,
            Self::Critical => RecommendedAction::SeekImmediateCare,
            Self::High => RecommendedAction::ScheduleUrgentAppointment,
            Self::Medium => RecommendedAction::ScheduleRoutineAppointment,
            Self::Low => RecommendedAction::SelfCare,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
            Self::Emergency => "emergency",
        }
    }
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the patient should do next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendedAction {
    #[default]
    SelfCare,
    ScheduleRoutineAppointment,
    ScheduleUrgentAppointment,
    SeekImmediateCare,
    CallEmergencyServices,
}

impl RecommendedAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SelfCare => "self-care",
            Self::ScheduleRoutineAppointment => "schedule-routine-appointment",
            Self::ScheduleUrgentAppointment => "schedule-urgent-appointment",
            Self::SeekImmediateCare => "seek-immediate-care",
            Self::CallEmergencyServices => "call-emergency-services",
        }
    }
}

impl fmt::Display for RecommendedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The score together with everything derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub triage_score: TriageScore,
    pub urgency_level: UrgencyLevel,
    pub recommended_action: RecommendedAction,
    pub is_emergency: bool,
}

impl Classification {
    pub fn from_score(score: TriageScore) -> Self {
        let urgency_level = UrgencyLevel::from_score(score);
        Self {
            triage_score: score,
            urgency_level,
            recommended_action: urgency_level.recommended_action(),
            is_emergency: urgency_level == UrgencyLevel::Emergency,
        }
    }
}

impl Default for Classification {
    fn default() -> Self {
        Self::from_score(TriageScore::default())
    }
}

/// Specialist referral and advice generated from symptoms and urgency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiRecommendation {
    pub specialist_type: String,
    pub reasoning: String,
    pub suggested_tests: Vec<String>,
    pub timeframe: String,
    pub precautions: Vec<String>,
}

/// What `complete` returns to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageOutcome {
    pub session_id: SessionId,
    pub triage_score: TriageScore,
    pub urgency_level: UrgencyLevel,
    pub recommended_action: RecommendedAction,
    pub ai_recommendation: AiRecommendation,
    pub is_emergency: bool,
}

impl TriageOutcome {
    pub fn new(
        session_id: SessionId,
        classification: Classification,
        ai_recommendation: AiRecommendation,
    ) -> Self {
        Self {
            session_id,
            triage_score: classification.triage_score,
            urgency_level: classification.urgency_level,
            recommended_action: classification.recommended_action,
            ai_recommendation,
            is_emergency: classification.is_emergency,
        }
    }
}
