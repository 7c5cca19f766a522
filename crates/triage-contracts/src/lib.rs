//! # triage-contracts
//!
//! Shared types for the triage engine: session records, intake data,
//! score/urgency/recommendation outcomes, audit records and errors.
//!
//! All crates in the workspace import from here. The only logic in this
//! crate is what the types need to keep their own invariants: score
//! clamping, score-to-urgency classification and shallow intake merges.

pub mod error;
pub mod history;
pub mod intake;
pub mod outcome;
pub mod record;
pub mod session;
pub mod verify;
