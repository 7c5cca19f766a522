//! Scenario 2: Emergency escalation
//!
//! Crushing chest pain with breathing difficulty and extreme vitals scores 9.
//! The outcome is flagged as an emergency and the session is escalated.

use triage_contracts::error::TriageResult;

use crate::{
    mock_data,
    runtime::{RuleSources, Runtime},
};

use super::{print_audit, print_outcome};

pub fn run_scenario(rules: &RuleSources) -> TriageResult<()> {
    println!("=== Scenario 2: Emergency Escalation ===");
    println!();

    let runtime = Runtime::build(rules, "emergency")?;
    let intake = mock_data::emergency();
    let patient = &intake.patient_id;

    let session_id = intake.submit(&runtime.service)?;
    println!("  Session:                {}", session_id);
    println!();

    let outcome = runtime.service.complete(&session_id, patient)?;
    print_outcome(&outcome);
    println!();

    if outcome.is_emergency {
        let escalated = runtime.service.escalate(&session_id, patient)?;
        println!("  Escalation:             session is now {}", escalated.status);
    } else {
        println!("  Escalation:             not required");
    }
    println!();

    print_audit(&runtime.audit);
    println!();
    println!("  Scenario 2 complete.");
    println!();

    Ok(())
}
