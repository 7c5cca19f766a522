//! In-memory implementation of `AuditWriter`.
//!
//! `InMemoryAuditWriter` keeps a single chain for every session the service
//! touches, so the relative order of operations across sessions is part of
//! what the chain commits to. Use `session_events()` to read one session's
//! trail, `export_log()` for a snapshot of everything, and
//! `verify_integrity()` to confirm nothing was altered in memory.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tracing::{debug, info};

use triage_contracts::{
    error::{TriageError, TriageResult},
    record::SessionRecord,
    session::SessionId,
};
use triage_core::traits::AuditWriter;

use crate::{
    chain::{hash_event, verify_chain},
    event::{AuditEvent, AuditLog},
};

// ── Internal mutable state ────────────────────────────────────────────────────

pub(crate) struct InMemoryState {
    /// All events written so far, in append order.
    pub(crate) events: Vec<AuditEvent>,

    /// The next sequence number to assign.
    pub(crate) sequence: u64,

    /// `this_hash` of the last event, or `GENESIS_HASH` before the first.
    pub(crate) last_hash: String,

    pub(crate) finalized: Vec<SessionId>,
}

// ── Public writer ─────────────────────────────────────────────────────────────

/// An append-only audit writer backed by a SHA-256 hash chain.
///
/// Cloning is cheap and every clone appends to the same chain, which lets a
/// caller keep a handle for inspection after boxing one into the service.
#[derive(Clone)]
pub struct InMemoryAuditWriter {
    log_id: String,
    pub(crate) state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryAuditWriter {
    pub fn new(log_id: impl Into<String>) -> Self {
        let state = InMemoryState {
            events: Vec::new(),
            sequence: 0,
            last_hash: AuditEvent::GENESIS_HASH.to_string(),
            finalized: Vec::new(),
        };
        Self {
            log_id: log_id.into(),
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn log_id(&self) -> &str {
        &self.log_id
    }

    /// Snapshot every event written so far.
    pub fn export_log(&self) -> AuditLog {
        let state = self.read_state();
        AuditLog {
            log_id: self.log_id.clone(),
            events: state.events.clone(),
            finalized_sessions: state.finalized.clone(),
            exported_at: Utc::now(),
            terminal_hash: state
                .events
                .last()
                .map(|e| e.this_hash.clone())
                .unwrap_or_default(),
        }
    }

    /// The events recorded for one session, in chain order.
    pub fn session_events(&self, session_id: &SessionId) -> Vec<AuditEvent> {
        self.read_state()
            .events
            .iter()
            .filter(|e| &e.record.session_id == session_id)
            .cloned()
            .collect()
    }

    pub fn is_finalized(&self, session_id: &SessionId) -> bool {
        self.read_state().finalized.contains(session_id)
    }

    /// Check prev-hash linkage and hash correctness for every event.
    pub fn verify_integrity(&self) -> bool {
        verify_chain(&self.read_state().events)
    }

    /// Readers only copy data out, so a poisoned lock is still safe to read.
    fn read_state(&self) -> MutexGuard<'_, InMemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> TriageResult<MutexGuard<'_, InMemoryState>> {
        self.state.lock().map_err(|e| TriageError::AuditWriteFailed {
            reason: format!("audit state lock poisoned: {}", e),
        })
    }
}

// ── AuditWriter impl ──────────────────────────────────────────────────────────

impl AuditWriter for InMemoryAuditWriter {
    fn write(&self, record: &SessionRecord) -> TriageResult<()> {
        let mut state = self.write_state()?;

        let prev_hash = state.last_hash.clone();
        let sequence = state.sequence;
        let this_hash = hash_event(&self.log_id, sequence, record, &prev_hash)?;

        debug!(
            log_id = %self.log_id,
            sequence,
            session_id = %record.session_id,
            operation = record.operation.name(),
            "audit event appended"
        );

        state.events.push(AuditEvent {
            sequence,
            log_id: self.log_id.clone(),
            record: record.clone(),
            prev_hash,
            this_hash: this_hash.clone(),
        });
        state.sequence += 1;
        state.last_hash = this_hash;

        Ok(())
    }

    /// Seal a session's trail. Sealing the same session twice is rejected.
    fn finalize(&self, session_id: &SessionId) -> TriageResult<()> {
        let mut state = self.write_state()?;

        if state.finalized.contains(session_id) {
            return Err(TriageError::AuditWriteFailed {
                reason: format!("session {} is already finalized", session_id),
            });
        }
        state.finalized.push(*session_id);

        let event_count = state
            .events
            .iter()
            .filter(|e| &e.record.session_id == session_id)
            .count();

        info!(
            log_id = %self.log_id,
            session_id = %session_id,
            event_count,
            terminal_hash = %state.last_hash,
            "session audit trail finalized"
        );

        Ok(())
    }
}
