//! # triage-core
//!
//! The session lifecycle runtime for the triage engine.
//!
//! This crate provides:
//! - The five seam traits (`ScoringEngine`, `RecommendationEngine`,
//!   `SessionStore`, `AuditWriter`, `OutcomeVerifier`)
//! - The `TriageService` that wires them together and enforces ownership,
//!   the in-progress guard and exactly-once completion
//!
//! ## Usage
//!
//! ```rust,ignore
//! use triage_core::{TriageService, traits::{ScoringEngine, SessionStore}};
//! ```

pub mod service;
pub mod traits;

pub use service::{ServiceConfig, TriageService};
