//! Triage session identity, status and the session record itself.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    intake::{AssessmentAnswer, MedicalHistory, Symptom, VitalSigns},
    outcome::{AiRecommendation, Classification, RecommendedAction, TriageScore, UrgencyLevel},
};

/// Opaque, unique identifier for one triage session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub uuid::Uuid);

impl SessionId {
    /// Create a new, unique session ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "triage_{}", self.0.simple())
    }
}

/// Identity of the patient who owns a session. Issued by the auth layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatientId(pub String);

impl PatientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of a doctor a completed session is referred to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoctorId(pub String);

impl DoctorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for DoctorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle status of a session.
///
/// ```text
/// in-progress ──complete──▶ completed ──refer──▶ referred
///      │                        │
///      └────────escalate────────┴──────▶ emergency-escalated
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionStatus {
    #[default]
    InProgress,
    Completed,
    Referred,
    EmergencyEscalated,
}

impl SessionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Referred => "referred",
            Self::EmergencyEscalated => "emergency-escalated",
        }
    }

    /// Return true if a session may move from `self` to `next`.
    pub fn can_transition_to(self, next: SessionStatus) -> bool {
        matches!(
            (self, next),
            (Self::InProgress, Self::Completed)
                | (Self::Completed, Self::Referred)
                | (Self::InProgress, Self::EmergencyEscalated)
                | (Self::Completed, Self::EmergencyEscalated)
        )
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One patient-initiated triage assessment.
///
/// Intake fields are mutable only while `status` is `InProgress`; the
/// session service enforces this. Score, urgency, action and emergency flag
/// hold their in-progress defaults until completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageSession {
    pub session_id: SessionId,
    pub patient_id: PatientId,
    pub symptoms: Vec<Symptom>,
    pub vital_signs: VitalSigns,
    pub medical_history: MedicalHistory,
    pub assessment_answers: Vec<AssessmentAnswer>,
    pub triage_score: TriageScore,
    pub urgency_level: UrgencyLevel,
    pub recommended_action: RecommendedAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_recommendation: Option<AiRecommendation>,
    pub is_emergency: bool,
    pub status: SessionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referred_doctor_id: Option<DoctorId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Optimistic-concurrency counter, bumped by the store on every write.
    pub version: u64,
}

impl TriageSession {
    /// Create an empty, in-progress session for `patient_id`.
    pub fn new(patient_id: PatientId) -> Self {
        let now = Utc::now();
        let classification = Classification::default();
        Self {
            session_id: SessionId::new(),
            patient_id,
            symptoms: Vec::new(),
            vital_signs: VitalSigns::default(),
            medical_history: MedicalHistory::default(),
            assessment_answers: Vec::new(),
            triage_score: classification.triage_score,
            urgency_level: classification.urgency_level,
            recommended_action: classification.recommended_action,
            ai_recommendation: None,
            is_emergency: classification.is_emergency,
            status: SessionStatus::InProgress,
            referred_doctor_id: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
            version: 0,
        }
    }

    pub fn is_owned_by(&self, patient_id: &PatientId) -> bool {
        &self.patient_id == patient_id
    }

    /// Copy a classification into the session's score fields.
    pub fn apply_classification(&mut self, classification: Classification) {
        self.triage_score = classification.triage_score;
        self.urgency_level = classification.urgency_level;
        self.recommended_action = classification.recommended_action;
        self.is_emergency = classification.is_emergency;
    }
}
