//! Scenario 3: Concurrent completion
//!
//! Four requests race to complete the same session. The versioned store lets
//! exactly one of them score and commit; the rest re-read a completed
//! session and are rejected. The patient's history then lists the session
//! once.

use std::thread;

use triage_contracts::error::{TriageError, TriageResult};

use crate::{
    mock_data,
    runtime::{RuleSources, Runtime},
};

use super::{print_audit, print_outcome};

/// Number of racing completion requests.
const RACERS: usize = 4;

pub fn run_scenario(rules: &RuleSources) -> TriageResult<()> {
    println!("=== Scenario 3: Concurrent Completion ===");
    println!();

    let runtime = Runtime::build(rules, "concurrent-complete")?;
    let intake = mock_data::routine_cough();
    let patient = &intake.patient_id;

    let session_id = intake.submit(&runtime.service)?;
    println!("  Session:                {}", session_id);
    println!("  Racing completions:     {}", RACERS);
    println!();

    let results: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..RACERS)
            .map(|_| s.spawn(|| runtime.service.complete(&session_id, patient)))
            .collect();
        handles
            .into_iter()
            .map(|h| {
                h.join().unwrap_or_else(|_| {
                    Err(TriageError::StoreError {
                        reason: "completion thread panicked".to_string(),
                    })
                })
            })
            .collect()
    });

    let mut winner = None;
    for (racer, result) in results.into_iter().enumerate() {
        match result {
            Ok(outcome) => {
                println!("  Request {}:              COMPLETED", racer + 1);
                winner = Some(outcome);
            }
            Err(TriageError::InvalidState { status, .. }) => {
                println!("  Request {}:              rejected (session is {})", racer + 1, status);
            }
            Err(e) => return Err(e),
        }
    }
    println!();

    if let Some(outcome) = &winner {
        print_outcome(outcome);
        println!();
    }

    let history = runtime.service.history(patient, 1, 10)?;
    println!(
        "  History:                {} completed session(s) on page {} of {}",
        history.pagination.total_triages,
        history.pagination.current_page,
        history.pagination.total_pages
    );

    print_audit(&runtime.audit);
    println!();
    println!("  Scenario 3 complete.");
    println!();

    Ok(())
}
