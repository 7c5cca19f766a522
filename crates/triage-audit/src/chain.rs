//! Hashing and chain verification.
//!
//! Hash input layout (bytes, in order):
//!   1. log_id as UTF-8 bytes
//!   2. sequence as 8-byte little-endian
//!   3. prev_hash as UTF-8 bytes (64 ASCII hex chars)
//!   4. compact JSON of the session record

use sha2::{Digest, Sha256};

use triage_contracts::{
    error::{TriageError, TriageResult},
    record::SessionRecord,
};

use crate::event::AuditEvent;

/// Compute the SHA-256 hash for one audit event as a lowercase hex string.
///
/// Fails with `AuditWriteFailed` if the record cannot be serialized.
pub fn hash_event(
    log_id: &str,
    sequence: u64,
    record: &SessionRecord,
    prev_hash: &str,
) -> TriageResult<String> {
    let record_json = serde_json::to_vec(record).map_err(|e| TriageError::AuditWriteFailed {
        reason: format!("failed to serialize session record: {}", e),
    })?;

    let mut hasher = Sha256::new();
    hasher.update(log_id.as_bytes());
    hasher.update(sequence.to_le_bytes());
    hasher.update(prev_hash.as_bytes());
    hasher.update(&record_json);

    Ok(hex::encode(hasher.finalize()))
}

/// Verify the integrity of a hash chain.
///
/// Each event's `prev_hash` must equal the previous event's `this_hash`
/// (`GENESIS_HASH` for the first), its `sequence` must equal its position,
/// and its `this_hash` must match the hash recomputed from its fields.
/// An empty chain is valid.
pub fn verify_chain(events: &[AuditEvent]) -> bool {
    let mut expected_prev = AuditEvent::GENESIS_HASH;

    for (position, event) in events.iter().enumerate() {
        if event.sequence != position as u64 || event.prev_hash != expected_prev {
            return false;
        }

        match hash_event(&event.log_id, event.sequence, &event.record, &event.prev_hash) {
            Ok(recomputed) if recomputed == event.this_hash => {}
            _ => return false,
        }

        expected_prev = event.this_hash.as_str();
    }

    true
}
