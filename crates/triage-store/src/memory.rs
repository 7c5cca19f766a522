//! In-memory implementation of `SessionStore`.
//!
//! Sessions live in a `HashMap` behind an `RwLock`. Reads clone the session
//! out; `replace` holds the write lock across the version check and the
//! insert, which makes check-and-set atomic.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use triage_contracts::{
    error::{TriageError, TriageResult},
    session::{PatientId, SessionId, TriageSession},
};
use triage_core::traits::SessionStore;

/// A versioned session store held entirely in memory.
///
/// Clones share the same map.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, TriageSession>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.read().map_or(0, |sessions| sessions.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> TriageResult<RwLockReadGuard<'_, HashMap<SessionId, TriageSession>>> {
        self.sessions.read().map_err(|e| TriageError::StoreError {
            reason: format!("session store lock poisoned: {}", e),
        })
    }

    fn write(&self) -> TriageResult<RwLockWriteGuard<'_, HashMap<SessionId, TriageSession>>> {
        self.sessions.write().map_err(|e| TriageError::StoreError {
            reason: format!("session store lock poisoned: {}", e),
        })
    }
}

impl SessionStore for InMemorySessionStore {
    fn insert(&self, session: TriageSession) -> TriageResult<()> {
        let mut sessions = self.write()?;
        if sessions.contains_key(&session.session_id) {
            return Err(TriageError::StoreError {
                reason: format!("session {} already exists", session.session_id),
            });
        }
        debug!(session_id = %session.session_id, "session inserted");
        sessions.insert(session.session_id, session);
        Ok(())
    }

    fn get(&self, session_id: &SessionId) -> TriageResult<Option<TriageSession>> {
        Ok(self.read()?.get(session_id).cloned())
    }

    fn replace(&self, mut session: TriageSession) -> TriageResult<TriageSession> {
        let mut sessions = self.write()?;

        let stored_version = match sessions.get(&session.session_id) {
            Some(stored) => stored.version,
            None => {
                return Err(TriageError::NotFound {
                    session_id: session.session_id,
                })
            }
        };

        if stored_version != session.version {
            debug!(
                session_id = %session.session_id,
                stored_version,
                read_version = session.version,
                "stale write rejected"
            );
            return Err(TriageError::VersionConflict {
                session_id: session.session_id,
            });
        }

        session.version += 1;
        sessions.insert(session.session_id, session.clone());
        Ok(session)
    }

    fn list_for_patient(&self, patient_id: &PatientId) -> TriageResult<Vec<TriageSession>> {
        Ok(self
            .read()?
            .values()
            .filter(|s| s.is_owned_by(patient_id))
            .cloned()
            .collect())
    }
}
