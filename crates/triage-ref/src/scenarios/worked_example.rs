//! Scenario 1: Worked example
//!
//! A patient with chest pain, a high fever, severe hypertension and
//! tachycardia submits each intake section, completes the session and is
//! referred to a cardiologist.
//!
//!   1. Start a session and submit symptoms, vitals, history and answers
//!   2. Complete: score 8.4 rounds to 8 (critical, seek immediate care)
//!   3. A second completion is rejected; the session is frozen
//!   4. Refer the completed session to the on-call cardiologist
//!   5. Audit chain integrity verified at the end

use triage_contracts::error::{TriageError, TriageResult};

use crate::{
    mock_data,
    runtime::{RuleSources, Runtime},
};

use super::{print_audit, print_outcome};

pub fn run_scenario(rules: &RuleSources) -> TriageResult<()> {
    println!("=== Scenario 1: Worked Example ===");
    println!();

    let runtime = Runtime::build(rules, "worked-example")?;
    let intake = mock_data::worked_example();
    let patient = &intake.patient_id;

    let session_id = intake.submit(&runtime.service)?;
    println!("  Session:                {}", session_id);
    println!("  Patient:                {}", patient);
    println!("  Symptoms submitted:     {}", intake.symptoms.len());
    println!("  Vitals:                 T 103.0 F, BP 190/110, HR 130");
    println!();

    let outcome = runtime.service.complete(&session_id, patient)?;
    print_outcome(&outcome);
    println!();

    match runtime.service.complete(&session_id, patient) {
        Err(TriageError::InvalidState { status, .. }) => {
            println!("  Second completion:      rejected (session is {})", status);
        }
        Ok(_) => println!("  Second completion:      UNEXPECTEDLY ACCEPTED"),
        Err(e) => return Err(e),
    }

    let referred = runtime
        .service
        .refer(&session_id, patient, mock_data::on_call_cardiologist())?;
    println!(
        "  Referred to:            {} (status {})",
        mock_data::on_call_cardiologist(),
        referred.status
    );
    println!();

    print_audit(&runtime.audit);
    println!();
    println!("  Scenario 1 complete.");
    println!();

    Ok(())
}
