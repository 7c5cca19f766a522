//! Seam traits for the triage session runtime.
//!
//! - `ScoringEngine`: pure score computation from intake data
//! - `RecommendationEngine`: pure specialist/timeframe advice
//! - `SessionStore`: session persistence with optimistic concurrency
//! - `AuditWriter`: append-only record of every lifecycle operation
//! - `OutcomeVerifier`: last check before a completion is persisted
//!
//! The service wires them together. The two engines are pure and must be
//! deterministic; everything with side effects sits behind the other three.

use triage_contracts::{
    error::TriageResult,
    intake::{AssessmentAnswer, Symptom, VitalSigns},
    outcome::{AiRecommendation, TriageOutcome, TriageScore, UrgencyLevel},
    record::SessionRecord,
    session::{PatientId, SessionId, TriageSession},
    verify::VerificationReport,
};

/// Converts accumulated intake data into a triage score.
///
/// Implementations must be pure: the same inputs always produce the same
/// score, and no input, however malformed, may produce a panic or a score
/// outside [1, 10].
pub trait ScoringEngine: Send + Sync {
    fn score(
        &self,
        symptoms: &[Symptom],
        vitals: &VitalSigns,
        answers: &[AssessmentAnswer],
    ) -> TriageScore;
}

/// Derives specialist advice from symptoms and the computed urgency.
pub trait RecommendationEngine: Send + Sync {
    fn recommend(
        &self,
        symptoms: &[Symptom],
        score: TriageScore,
        urgency: UrgencyLevel,
    ) -> AiRecommendation;
}

/// Session persistence.
///
/// Writes are guarded by `TriageSession::version`: `replace` must fail with
/// `TriageError::VersionConflict` unless the stored version equals the
/// version of the session passed in, and must bump the version on success.
/// This is what serializes concurrent read-modify-write cycles.
pub trait SessionStore: Send + Sync {
    /// Store a brand-new session.
    fn insert(&self, session: TriageSession) -> TriageResult<()>;

    /// Fetch a session by ID, regardless of owner.
    fn get(&self, session_id: &SessionId) -> TriageResult<Option<TriageSession>>;

    /// Overwrite a session if nobody else wrote it since it was read.
    ///
    /// Returns the stored session with its new version.
    fn replace(&self, session: TriageSession) -> TriageResult<TriageSession>;

    /// Every session owned by `patient_id`, in no particular order.
    fn list_for_patient(&self, patient_id: &PatientId) -> TriageResult<Vec<TriageSession>>;
}

/// The immutable lifecycle record.
///
/// Every service operation, accepted or rejected, produces exactly one
/// `SessionRecord`. A failed write is fatal: the operation returns
/// `TriageError::AuditWriteFailed`.
pub trait AuditWriter: Send + Sync {
    /// Append one record. Records are never modified or deleted.
    fn write(&self, record: &SessionRecord) -> TriageResult<()>;

    /// Mark a session's scoring as complete in the log.
    fn finalize(&self, session_id: &SessionId) -> TriageResult<()>;
}

/// Checks a computed outcome before it is persisted.
///
/// A failing report aborts the completion; the session stays in progress.
pub trait OutcomeVerifier: Send + Sync {
    fn verify(&self, outcome: &TriageOutcome) -> TriageResult<VerificationReport>;
}
