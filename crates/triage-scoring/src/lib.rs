//! # triage-scoring
//!
//! A TOML-configured, weighted triage scoring engine.
//!
//! ## Overview
//!
//! This crate provides [`WeightedScoringEngine`], which implements the
//! [`ScoringEngine`](triage_core::traits::ScoringEngine) trait. The symptom,
//! vital-sign and assessment components are averaged, weighted and summed;
//! the sum is rounded and clamped to the 1–10 triage range.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use triage_scoring::WeightedScoringEngine;
//!
//! let engine = WeightedScoringEngine::embedded()?;
//! let custom = WeightedScoringEngine::from_file(Path::new("rules/pediatric.toml"))?;
//! ```
//!
//! ## Vital bands
//!
//! Each scored vital lists bands in priority order. A band matches when the
//! reading is strictly above its `above` limit or strictly below its `below`
//! limit; the first match supplies the points.

pub mod engine;
pub mod rule;

pub use engine::{ScoreBreakdown, WeightedScoringEngine, DEFAULT_SCORING_RULES};
pub use rule::{ComponentWeights, ScoringConfig, VitalBand, VitalRule, VitalSign};

// ── Tests ─────────────────────────────────────────────────────────────────────
