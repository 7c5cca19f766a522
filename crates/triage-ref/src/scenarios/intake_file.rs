//! Intake file runner
//!
//! Validates an intake document, submits it as a new session, completes the
//! session and prints the outcome.

use std::path::Path;

use triage_contracts::{error::TriageResult, outcome::TriageOutcome};

use crate::{
    intake::Intake,
    runtime::{RuleSources, Runtime},
};

use super::{print_audit, print_outcome};

/// Validate, submit and complete `intake` on a fresh runtime.
pub fn run_intake(rules: &RuleSources, intake: &Intake) -> TriageResult<TriageOutcome> {
    let runtime = Runtime::build(rules, "intake-file")?;
    let session_id = intake.submit(&runtime.service)?;
    println!("  Session:                {}", session_id);
    println!("  Patient:                {}", intake.patient_id);
    println!();

    let outcome = runtime.service.complete(&session_id, &intake.patient_id)?;
    print_outcome(&outcome);
    println!();
    print_audit(&runtime.audit);
    println!();

    Ok(outcome)
}

pub fn run_file(rules: &RuleSources, path: &Path) -> TriageResult<TriageOutcome> {
    println!("=== Intake: {} ===", path.display());
    println!();
    let intake = Intake::from_file(path)?;
    run_intake(rules, &intake)
}
