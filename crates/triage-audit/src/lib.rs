//! # triage-audit
//!
//! Append-only, SHA-256 hash-chained log of triage session operations.
//!
//! Every `SessionRecord` the service produces, accepted or rejected, is
//! wrapped in an `AuditEvent` that links to the previous event via its hash.
//! Altering any stored event breaks the chain, and `verify_chain` detects it.
//!
//! ```rust,ignore
//! use triage_audit::InMemoryAuditWriter;
//!
//! let audit = InMemoryAuditWriter::new("clinic-east");
//! let service = TriageService::new(scorer, recommender, store, Box::new(audit.clone()), verifier);
//! // ... run sessions ...
//! assert!(audit.verify_integrity());
//! ```

pub mod chain;
pub mod event;
pub mod memory;

pub use chain::{hash_event, verify_chain};
pub use event::{AuditEvent, AuditLog};
pub use memory::InMemoryAuditWriter;

// ── Tests ─────────────────────────────────────────────────────────────────────
