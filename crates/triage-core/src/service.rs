//! The triage session service: the lifecycle runner around the engines.
//!
//! The service enforces the session model:
//!
//!   Load → Ownership → Status guard → Apply → Versioned write → Audit
//!
//! Intake updates are only accepted while a session is in progress, and a
//! session is scored at most once. Every write goes through
//! `SessionStore::replace`, which fails on a version mismatch; the service
//! then re-reads and re-applies the operation. Updates are idempotent, so
//! re-applying is safe, and a completion that lost the race re-reads a
//! completed session and fails its status guard.

use chrono::Utc;
use tracing::{debug, error, info, warn};

use triage_contracts::{
    error::{TriageError, TriageResult},
    history::{HistoryEntry, HistoryPage, Pagination},
    intake::{AssessmentAnswer, MedicalHistory, Symptom, VitalSigns},
    outcome::{Classification, TriageOutcome},
    record::{SessionOperation, SessionRecord},
    session::{DoctorId, PatientId, SessionId, SessionStatus, TriageSession},
};

use crate::traits::{
    AuditWriter, OutcomeVerifier, RecommendationEngine, ScoringEngine, SessionStore,
};

/// Tunables for the session service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    /// How many read-modify-write attempts an operation makes before giving
    /// up with `VersionConflict`.
    pub max_write_attempts: usize,
    /// Page size used by `history` when the caller passes a limit of 0.
    pub default_history_limit: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_write_attempts: 3,
            default_history_limit: 10,
        }
    }
}

/// The central service that owns every triage session lifecycle.
///
/// The engines are pure; the store, audit writer and verifier are the only
/// components with side effects. One service instance is shared by all
/// callers and may be used from many threads.
pub struct TriageService {
    scorer: Box<dyn ScoringEngine>,
    recommender: Box<dyn RecommendationEngine>,
    store: Box<dyn SessionStore>,
    audit: Box<dyn AuditWriter>,
    verifier: Box<dyn OutcomeVerifier>,
    config: ServiceConfig,
}

impl TriageService {
    /// Create a service with the default `ServiceConfig`.
    pub fn new(
        scorer: Box<dyn ScoringEngine>,
        recommender: Box<dyn RecommendationEngine>,
        store: Box<dyn SessionStore>,
        audit: Box<dyn AuditWriter>,
        verifier: Box<dyn OutcomeVerifier>,
    ) -> Self {
        Self {
            scorer,
            recommender,
            store,
            audit,
            verifier,
            config: ServiceConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    // ── Lifecycle operations ─────────────────────────────────────────────────

    /// Create an empty, in-progress session owned by `patient_id`.
    pub fn start(&self, patient_id: PatientId) -> TriageResult<SessionId> {
        let session = TriageSession::new(patient_id.clone());
        let session_id = session.session_id;

        self.store.insert(session)?;
        self.audit
            .write(&SessionRecord::accepted(session_id, patient_id.clone(), SessionOperation::Start))?;

        info!(session_id = %session_id, patient_id = %patient_id, "triage session started");
        Ok(session_id)
    }

    /// Replace the session's symptom list.
    pub fn update_symptoms(
        &self,
        session_id: &SessionId,
        patient_id: &PatientId,
        symptoms: Vec<Symptom>,
    ) -> TriageResult<TriageSession> {
        let operation = SessionOperation::UpdateSymptoms { count: symptoms.len() };
        let (session, ()) = self.modify(session_id, patient_id, &operation, |session| {
            require_status(session, SessionStatus::InProgress)?;
            session.symptoms = symptoms.clone();
            Ok(())
        })?;
        self.record_accepted(&session, operation)?;
        Ok(session)
    }

    /// Shallow-merge `vitals` into the session's vital signs.
    pub fn update_vitals(
        &self,
        session_id: &SessionId,
        patient_id: &PatientId,
        vitals: VitalSigns,
    ) -> TriageResult<TriageSession> {
        let operation = SessionOperation::UpdateVitals;
        let (session, ()) = self.modify(session_id, patient_id, &operation, |session| {
            require_status(session, SessionStatus::InProgress)?;
            session.vital_signs.merge(vitals.clone());
            Ok(())
        })?;
        self.record_accepted(&session, operation)?;
        Ok(session)
    }

    /// Shallow-merge `history` into the session's medical history.
    pub fn update_history(
        &self,
        session_id: &SessionId,
        patient_id: &PatientId,
        history: MedicalHistory,
    ) -> TriageResult<TriageSession> {
        let operation = SessionOperation::UpdateHistory;
        let (session, ()) = self.modify(session_id, patient_id, &operation, |session| {
            require_status(session, SessionStatus::InProgress)?;
            session.medical_history.merge(history.clone());
            Ok(())
        })?;
        self.record_accepted(&session, operation)?;
        Ok(session)
    }

    /// Replace the session's assessment answers.
    pub fn update_assessment(
        &self,
        session_id: &SessionId,
        patient_id: &PatientId,
        answers: Vec<AssessmentAnswer>,
    ) -> TriageResult<TriageSession> {
        let operation = SessionOperation::UpdateAssessment { count: answers.len() };
        let (session, ()) = self.modify(session_id, patient_id, &operation, |session| {
            require_status(session, SessionStatus::InProgress)?;
            session.assessment_answers = answers.clone();
            Ok(())
        })?;
        self.record_accepted(&session, operation)?;
        Ok(session)
    }

    /// Score the session, freeze it and return the outcome.
    ///
    /// # Pipeline
    ///
    /// 1. Load the session and check ownership (`NotFound` otherwise)
    /// 2. Check the status is in progress (`InvalidState` otherwise)
    /// 3. Score, classify and generate the recommendation
    /// 4. Verify the outcome; a failing report aborts with `VerificationFailed`
    /// 5. Write the completed session; on a version conflict go back to 1
    /// 6. Audit the completion and finalize the session's audit trail
    ///
    /// If the completion cannot be audited, the stored session is restored to
    /// its in-progress state and `AuditWriteFailed` is returned, so the caller
    /// may complete it again.
    pub fn complete(
        &self,
        session_id: &SessionId,
        patient_id: &PatientId,
    ) -> TriageResult<TriageOutcome> {
        let operation = SessionOperation::Complete;
        let (session, (outcome, previous)) = self.modify(session_id, patient_id, &operation, |session| {
            require_status(session, SessionStatus::Completed)?;
            let previous = session.clone();

            let score = self.scorer.score(
                &session.symptoms,
                &session.vital_signs,
                &session.assessment_answers,
            );
            let classification = Classification::from_score(score);
            let recommendation =
                self.recommender
                    .recommend(&session.symptoms, score, classification.urgency_level);
            let outcome =
                TriageOutcome::new(session.session_id, classification, recommendation.clone());

            let report = self.verifier.verify(&outcome)?;
            if !report.passed {
                return Err(TriageError::VerificationFailed {
                    reason: report.summary(),
                });
            }

            session.apply_classification(classification);
            session.ai_recommendation = Some(recommendation);
            session.status = SessionStatus::Completed;
            session.completed_at = Some(Utc::now());
            Ok((outcome, previous))
        })?;

        let record = SessionRecord::accepted(session.session_id, session.patient_id.clone(), operation)
            .with_classification(Classification::from_score(outcome.triage_score));
        if let Err(err) = self.audit.write(&record) {
            self.roll_back(previous, &session);
            return Err(err);
        }
        self.audit.finalize(&session.session_id)?;

        if outcome.is_emergency {
            warn!(
                session_id = %session.session_id,
                triage_score = %outcome.triage_score,
                "triage completed with emergency urgency"
            );
        } else {
            info!(
                session_id = %session.session_id,
                triage_score = %outcome.triage_score,
                urgency = %outcome.urgency_level,
                action = %outcome.recommended_action,
                "triage completed"
            );
        }

        Ok(outcome)
    }

    /// Refer a completed session to a doctor.
    pub fn refer(
        &self,
        session_id: &SessionId,
        patient_id: &PatientId,
        doctor_id: DoctorId,
    ) -> TriageResult<TriageSession> {
        let operation = SessionOperation::Refer { doctor_id: doctor_id.clone() };
        let (session, ()) = self.modify(session_id, patient_id, &operation, |session| {
            require_status(session, SessionStatus::Referred)?;
            session.status = SessionStatus::Referred;
            session.referred_doctor_id = Some(doctor_id.clone());
            Ok(())
        })?;
        self.record_accepted(&session, operation)?;
        info!(session_id = %session.session_id, doctor_id = %doctor_id, "triage session referred");
        Ok(session)
    }

    /// Escalate a session to emergency handling outside the scoring engine.
    pub fn escalate(
        &self,
        session_id: &SessionId,
        patient_id: &PatientId,
    ) -> TriageResult<TriageSession> {
        let operation = SessionOperation::Escalate;
        let (session, ()) = self.modify(session_id, patient_id, &operation, |session| {
            require_status(session, SessionStatus::EmergencyEscalated)?;
            session.status = SessionStatus::EmergencyEscalated;
            Ok(())
        })?;
        self.record_accepted(&session, operation)?;
        warn!(session_id = %session.session_id, "triage session escalated to emergency");
        Ok(session)
    }

    // ── Reads ────────────────────────────────────────────────────────────────

    /// Fetch a session owned by `patient_id`.
    pub fn session(
        &self,
        session_id: &SessionId,
        patient_id: &PatientId,
    ) -> TriageResult<TriageSession> {
        self.load_owned(session_id, patient_id)
    }

    /// List the patient's completed sessions, most recently completed first.
    ///
    /// `page` is 1-based (0 is treated as 1); a `limit` of 0 uses the
    /// configured default page size.
    pub fn history(
        &self,
        patient_id: &PatientId,
        page: usize,
        limit: usize,
    ) -> TriageResult<HistoryPage> {
        let page = page.max(1);
        let limit = if limit == 0 {
            self.config.default_history_limit
        } else {
            limit
        };

        let mut completed: Vec<TriageSession> = self
            .store
            .list_for_patient(patient_id)?
            .into_iter()
            .filter(|s| s.status == SessionStatus::Completed)
            .collect();
        completed.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));

        let total = completed.len();
        let triages: Vec<HistoryEntry> = completed
            .iter()
            .skip((page - 1).saturating_mul(limit))
            .take(limit)
            .map(HistoryEntry::from)
            .collect();

        debug!(
            patient_id = %patient_id,
            page,
            limit,
            total,
            "triage history listed"
        );

        Ok(HistoryPage {
            pagination: Pagination::new(page, limit, total, triages.len()),
            triages,
        })
    }

    // ── Internals ────────────────────────────────────────────────────────────

    fn load_owned(
        &self,
        session_id: &SessionId,
        patient_id: &PatientId,
    ) -> TriageResult<TriageSession> {
        match self.store.get(session_id)? {
            Some(session) if session.is_owned_by(patient_id) => Ok(session),
            _ => Err(TriageError::NotFound {
                session_id: *session_id,
            }),
        }
    }

    /// Run one read-modify-write cycle, retrying on version conflicts.
    ///
    /// `apply` performs the status guard and the mutation; it may run more
    /// than once. Any rejection is audited here before it is returned.
    fn modify<T>(
        &self,
        session_id: &SessionId,
        patient_id: &PatientId,
        operation: &SessionOperation,
        apply: impl Fn(&mut TriageSession) -> TriageResult<T>,
    ) -> TriageResult<(TriageSession, T)> {
        let attempts = self.config.max_write_attempts.max(1);

        for attempt in 1..=attempts {
            debug!(
                session_id = %session_id,
                operation = operation.name(),
                attempt,
                "session operation starting"
            );

            let result = self.load_owned(session_id, patient_id).and_then(|mut session| {
                let value = apply(&mut session)?;
                session.updated_at = Utc::now();
                let stored = self.store.replace(session)?;
                Ok((stored, value))
            });

            match result {
                Ok(done) => return Ok(done),
                Err(TriageError::VersionConflict { .. }) => {
                    debug!(
                        session_id = %session_id,
                        operation = operation.name(),
                        attempt,
                        "version conflict, retrying"
                    );
                }
                Err(err) => return Err(self.record_rejected(session_id, patient_id, operation, err)),
            }
        }

        let err = TriageError::VersionConflict {
            session_id: *session_id,
        };
        Err(self.record_rejected(session_id, patient_id, operation, err))
    }

    /// Put back the pre-completion state of a session whose completion was
    /// stored but could not be audited.
    fn roll_back(&self, mut previous: TriageSession, committed: &TriageSession) {
        previous.version = committed.version;
        previous.updated_at = Utc::now();
        match self.store.replace(previous) {
            Ok(_) => warn!(
                session_id = %committed.session_id,
                "unaudited completion rolled back"
            ),
            Err(err) => error!(
                session_id = %committed.session_id,
                error = %err,
                "failed to roll back unaudited completion"
            ),
        }
    }

    fn record_accepted(
        &self,
        session: &TriageSession,
        operation: SessionOperation,
    ) -> TriageResult<()> {
        debug!(
            session_id = %session.session_id,
            operation = operation.name(),
            version = session.version,
            "session operation accepted"
        );
        self.audit.write(&SessionRecord::accepted(
            session.session_id,
            session.patient_id.clone(),
            operation,
        ))
    }

    /// Audit a rejected operation and hand back the error to return.
    ///
    /// If the audit write itself fails, that failure replaces `err`.
    fn record_rejected(
        &self,
        session_id: &SessionId,
        patient_id: &PatientId,
        operation: &SessionOperation,
        err: TriageError,
    ) -> TriageError {
        warn!(
            session_id = %session_id,
            operation = operation.name(),
            error = %err,
            "session operation rejected"
        );
        let record = SessionRecord::rejected(
            *session_id,
            patient_id.clone(),
            operation.clone(),
            err.to_string(),
        );
        match self.audit.write(&record) {
            Ok(()) => err,
            Err(audit_err) => audit_err,
        }
    }
}

/// Fail with `InvalidState` unless the session may move to `target`.
///
/// Intake updates pass `InProgress` as the target, which only an in-progress
/// session satisfies.
fn require_status(session: &TriageSession, target: SessionStatus) -> TriageResult<()> {
    let allowed = if target == SessionStatus::InProgress {
        session.status == SessionStatus::InProgress
    } else {
        session.status.can_transition_to(target)
    };
    if allowed {
        Ok(())
    } else {
        Err(TriageError::InvalidState {
            session_id: session.session_id,
            status: session.status,
        })
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
