//! # triage-store
//!
//! A versioned, in-memory [`SessionStore`](triage_core::traits::SessionStore).
//!
//! Every successful `replace` bumps the session's `version`; a write carrying
//! a stale version fails with `VersionConflict`, and the service re-reads and
//! retries. That is the whole concurrency story: two racing completions
//! cannot both land, and concurrent merges are never lost.

pub mod memory;

pub use memory::InMemorySessionStore;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::thread;

    use triage_audit::InMemoryAuditWriter;
    use triage_contracts::{
        error::TriageError,
        intake::{AssessmentAnswer, Symptom, VitalSigns},
        record::{RecordVerdict, SessionOperation},
        session::{PatientId, SessionId, SessionStatus, TriageSession},
    };
    use triage_core::{traits::SessionStore, ServiceConfig, TriageService};
    use triage_recommend::KeywordRecommendationEngine;
    use triage_scoring::WeightedScoringEngine;
    use triage_verify::InvariantVerifier;

    use crate::InMemorySessionStore;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn patient() -> PatientId {
        PatientId::new("patient-store")
    }

    /// A service over the real engines, returning handles to the shared store
    /// and audit log.
    fn service(config: ServiceConfig) -> (TriageService, InMemorySessionStore, InMemoryAuditWriter) {
        let store = InMemorySessionStore::new();
        let audit = InMemoryAuditWriter::new("store-tests");
        let service = TriageService::new(
            Box::new(WeightedScoringEngine::embedded().unwrap()),
            Box::new(KeywordRecommendationEngine::embedded().unwrap()),
            Box::new(store.clone()),
            Box::new(audit.clone()),
            Box::new(InvariantVerifier::new()),
        )
        .with_config(config);
        (service, store, audit)
    }

    // ── Store behaviour ───────────────────────────────────────────────────────

    #[test]
    fn test_insert_and_get() {
        let store = InMemorySessionStore::new();
        let session = TriageSession::new(patient());
        let id = session.session_id;

        store.insert(session).unwrap();

        let fetched = store.get(&id).unwrap().unwrap();
        assert_eq!(fetched.session_id, id);
        assert_eq!(fetched.version, 0);
        assert_eq!(store.len(), 1);
        assert!(store.get(&SessionId::new()).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let store = InMemorySessionStore::new();
        let session = TriageSession::new(patient());

        store.insert(session.clone()).unwrap();
        assert!(matches!(
            store.insert(session),
            Err(TriageError::StoreError { .. })
        ));
    }

    #[test]
    fn test_replace_bumps_version() {
        let store = InMemorySessionStore::new();
        let session = TriageSession::new(patient());
        let id = session.session_id;
        store.insert(session).unwrap();

        let mut read = store.get(&id).unwrap().unwrap();
        read.symptoms = vec![Symptom::new("cough", 3)];
        let written = store.replace(read).unwrap();

        assert_eq!(written.version, 1);
        assert_eq!(store.get(&id).unwrap().unwrap().symptoms.len(), 1);
    }

    #[test]
    fn test_stale_replace_conflicts() {
        let store = InMemorySessionStore::new();
        let session = TriageSession::new(patient());
        let id = session.session_id;
        store.insert(session).unwrap();

        let first = store.get(&id).unwrap().unwrap();
        let second = store.get(&id).unwrap().unwrap();

        store.replace(first).unwrap();
        match store.replace(second) {
            Err(TriageError::VersionConflict { session_id }) => assert_eq!(session_id, id),
            other => panic!("expected VersionConflict, got {:?}", other),
        }
    }

    #[test]
    fn test_replace_unknown_session() {
        let store = InMemorySessionStore::new();
        assert!(matches!(
            store.replace(TriageSession::new(patient())),
            Err(TriageError::NotFound { .. })
        ));
    }

    #[test]
    fn test_list_for_patient() {
        let store = InMemorySessionStore::new();
        store.insert(TriageSession::new(patient())).unwrap();
        store.insert(TriageSession::new(patient())).unwrap();
        store.insert(TriageSession::new(PatientId::new("someone-else"))).unwrap();

        assert_eq!(store.list_for_patient(&patient()).unwrap().len(), 2);
        assert!(store
            .list_for_patient(&PatientId::new("nobody"))
            .unwrap()
            .is_empty());
    }

    // ── Service over the store ────────────────────────────────────────────────

    /// Eight threads race to complete one session: exactly one scores it,
    /// the rest see it already completed.
    #[test]
    fn test_concurrent_completion_scores_once() {
        let (service, store, audit) = service(ServiceConfig::default());
        let id = service.start(patient()).unwrap();
        service
            .update_symptoms(&id, &patient(), vec![Symptom::new("chest pain", 8)])
            .unwrap();
        service
            .update_assessment(&id, &patient(), vec![AssessmentAnswer::new("Worse?", "yes", 9.0)])
            .unwrap();

        let results: Vec<_> = thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| service.complete(&id, &patient())))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let wins = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(wins, 1, "exactly one completion must succeed: {:?}", results);
        for result in results.iter().filter(|r| r.is_err()) {
            assert!(
                matches!(
                    result,
                    Err(TriageError::InvalidState {
                        status: SessionStatus::Completed,
                        ..
                    })
                ),
                "losers must see the completed session: {:?}",
                result
            );
        }

        let stored = store.get(&id).unwrap().unwrap();
        assert_eq!(stored.status, SessionStatus::Completed);
        assert!(audit.is_finalized(&id));

        let completions: Vec<_> = audit
            .session_events(&id)
            .into_iter()
            .filter(|e| e.record.operation == SessionOperation::Complete)
            .collect();
        assert_eq!(completions.len(), 8);
        assert_eq!(
            completions
                .iter()
                .filter(|e| e.record.verdict == RecordVerdict::Accepted)
                .count(),
            1
        );
        assert!(audit.verify_integrity());
    }

    /// Concurrent merges of disjoint vitals are all kept.
    #[test]
    fn test_concurrent_vitals_merge() {
        let (service, store, _audit) = service(ServiceConfig {
            max_write_attempts: 8,
            ..ServiceConfig::default()
        });
        let id = service.start(patient()).unwrap();

        let updates = [
            VitalSigns {
                temperature: Some(99.5),
                ..Default::default()
            },
            VitalSigns {
                heart_rate: Some(88.0),
                ..Default::default()
            },
            VitalSigns {
                respiratory_rate: Some(16.0),
                ..Default::default()
            },
            VitalSigns {
                blood_sugar: Some(105.0),
                ..Default::default()
            },
        ];

        thread::scope(|s| {
            for update in &updates {
                let service = &service;
                let id = &id;
                s.spawn(move || {
                    service
                        .update_vitals(id, &patient(), update.clone())
                        .unwrap();
                });
            }
        });

        let stored = store.get(&id).unwrap().unwrap();
        assert_eq!(stored.vital_signs.temperature, Some(99.5));
        assert_eq!(stored.vital_signs.heart_rate, Some(88.0));
        assert_eq!(stored.vital_signs.respiratory_rate, Some(16.0));
        assert_eq!(stored.vital_signs.blood_sugar, Some(105.0));
        assert_eq!(stored.version, 4);
    }

    #[test]
    fn test_completed_session_is_frozen() {
        let (service, store, _audit) = service(ServiceConfig::default());
        let id = service.start(patient()).unwrap();
        service.complete(&id, &patient()).unwrap();
        let version = store.get(&id).unwrap().unwrap().version;

        let result = service.update_symptoms(&id, &patient(), vec![Symptom::new("cough", 2)]);
        assert!(matches!(result, Err(TriageError::InvalidState { .. })));
        assert_eq!(store.get(&id).unwrap().unwrap().version, version);
    }
}
