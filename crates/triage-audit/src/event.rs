//! Audit event and log types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use triage_contracts::{record::SessionRecord, session::SessionId};

/// One entry in the hash chain.
///
/// Changing any field, including those of the embedded `record`, invalidates
/// `this_hash` and every later `prev_hash`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Position in the chain, starting at 0.
    pub sequence: u64,

    /// The log this event belongs to.
    pub log_id: String,

    pub record: SessionRecord,

    /// `this_hash` of the previous event, or `GENESIS_HASH` for the first.
    pub prev_hash: String,

    /// Computed by `hash_event()` over (log_id, sequence, prev_hash, record).
    pub this_hash: String,
}

impl AuditEvent {
    /// The `prev_hash` of the first event in every chain.
    pub const GENESIS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}

/// A snapshot of the whole log, produced by `InMemoryAuditWriter::export_log()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    pub log_id: String,

    /// All events in chain order.
    pub events: Vec<AuditEvent>,

    /// Sessions whose completion has been sealed, in finalization order.
    pub finalized_sessions: Vec<SessionId>,

    pub exported_at: DateTime<Utc>,

    /// `this_hash` of the last event. Empty if the log is empty.
    pub terminal_hash: String,
}
