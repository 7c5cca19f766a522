//! Lifecycle audit records.
//!
//! Every service operation, accepted or rejected, produces exactly one
//! `SessionRecord`. The audit writer appends it to its store; records are
//! never modified.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    outcome::Classification,
    session::{DoctorId, PatientId, SessionId},
};

/// The lifecycle operation a record describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "operation")]
pub enum SessionOperation {
    Start,
    UpdateSymptoms { count: usize },
    UpdateVitals,
    UpdateHistory,
    UpdateAssessment { count: usize },
    Complete,
    Refer { doctor_id: DoctorId },
    Escalate,
}

impl SessionOperation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::UpdateSymptoms { .. } => "update-symptoms",
            Self::UpdateVitals => "update-vitals",
            Self::UpdateHistory => "update-history",
            Self::UpdateAssessment { .. } => "update-assessment",
            Self::Complete => "complete",
            Self::Refer { .. } => "refer",
            Self::Escalate => "escalate",
        }
    }
}

/// Whether the service accepted the operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "verdict")]
pub enum RecordVerdict {
    Accepted,
    Rejected { reason: String },
}

/// An immutable record of one lifecycle operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: SessionId,
    pub patient_id: PatientId,
    pub operation: SessionOperation,
    pub verdict: RecordVerdict,
    /// Present only on an accepted completion.
    pub classification: Option<Classification>,
    /// Wall-clock time the record was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl SessionRecord {
    pub fn accepted(session_id: SessionId, patient_id: PatientId, operation: SessionOperation) -> Self {
        Self {
            session_id,
            patient_id,
            operation,
            verdict: RecordVerdict::Accepted,
            classification: None,
            timestamp: Utc::now(),
        }
    }

    pub fn rejected(
        session_id: SessionId,
        patient_id: PatientId,
        operation: SessionOperation,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            session_id,
            patient_id,
            operation,
            verdict: RecordVerdict::Rejected { reason: reason.into() },
            classification: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_classification(mut self, classification: Classification) -> Self {
        self.classification = Some(classification);
        self
    }
}
