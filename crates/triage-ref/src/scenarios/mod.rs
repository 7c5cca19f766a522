//! Reference scenarios.
//!
//! Each scenario wires a full runtime (real engines, store, audit log and
//! verifier) over mock intakes and prints a walkthrough of one session
//! lifecycle pattern.

pub mod concurrent_complete;
pub mod emergency;
pub mod intake_file;
pub mod worked_example;

use triage_audit::InMemoryAuditWriter;
use triage_contracts::outcome::TriageOutcome;

fn print_outcome(outcome: &TriageOutcome) {
    let rec = &outcome.ai_recommendation;
    println!("  Triage score:           {}", outcome.triage_score);
    println!("  Urgency level:          {}", outcome.urgency_level);
    println!("  Recommended action:     {}", outcome.recommended_action);
    println!("  Emergency:              {}", outcome.is_emergency);
    println!("  Specialist:             {}", rec.specialist_type);
    println!("  Timeframe:              {}", rec.timeframe);
    if !rec.suggested_tests.is_empty() {
        println!("  Suggested tests:        {}", rec.suggested_tests.join(", "));
    }
    if !rec.precautions.is_empty() {
        println!("  Precautions:            {}", rec.precautions.join("; "));
    }
    println!("  Reasoning:              {}", rec.reasoning);
}

fn print_audit(audit: &InMemoryAuditWriter) {
    let log = audit.export_log();
    println!(
        "  Audit chain integrity:  {} ({} event(s) in chain)",
        if audit.verify_integrity() { "VERIFIED" } else { "FAILED" },
        log.events.len()
    );
}
