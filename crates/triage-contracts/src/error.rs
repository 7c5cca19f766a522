//! Error types for the triage session lifecycle.
//!
//! All fallible operations return `TriageResult<T>`. The scoring and
//! recommendation functions themselves never fail; these variants describe
//! caller mistakes, configuration problems and storage/audit failures.

use thiserror::Error;

use crate::session::{SessionId, SessionStatus};

/// The unified error type for the triage crates.
#[derive(Debug, Error)]
pub enum TriageError {
    /// The session does not exist, or exists but belongs to another patient.
    ///
    /// Ownership failures are reported as not-found so a caller cannot probe
    /// for other patients' session IDs.
    #[error("triage session {session_id} not found")]
    NotFound { session_id: SessionId },

    /// The operation is not allowed in the session's current status.
    #[error("triage session {session_id} is {status}; operation not allowed")]
    InvalidState {
        session_id: SessionId,
        status: SessionStatus,
    },

    /// A concurrent writer changed the session between read and write.
    #[error("triage session {session_id} was modified concurrently")]
    VersionConflict { session_id: SessionId },

    /// A raw intake payload failed validation.
    #[error("invalid intake payload: {reason}")]
    InvalidInput { reason: String },

    /// The computed outcome broke a triage invariant and was not persisted.
    #[error("outcome verification failed: {reason}")]
    VerificationFailed { reason: String },

    /// The audit writer could not persist a lifecycle record.
    ///
    /// Fatal: an operation that cannot be audited is not acknowledged.
    #[error("audit write failed: {reason}")]
    AuditWriteFailed { reason: String },

    /// A rule table or configuration file is missing or malformed.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The session store is unusable (e.g. a poisoned lock).
    #[error("session store error: {reason}")]
    StoreError { reason: String },
}

/// Convenience alias used throughout the triage crates.
pub type TriageResult<T> = Result<T, TriageError>;
