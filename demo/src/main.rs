//! Triage session service demo CLI
//!
//! Runs the reference scenarios, or validates and runs an intake file, over
//! the real scoring and recommendation engines.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- worked-example
//!   cargo run -p demo -- emergency
//!   cargo run -p demo -- concurrent-complete
//!   cargo run -p demo -- intake demo/intakes/headache.json
//!   cargo run -p demo -- --scoring-rules my-scoring.toml run-all

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use triage_contracts::error::TriageResult;
use triage_ref::{
    scenarios::{concurrent_complete, emergency, intake_file, worked_example},
    RuleSources,
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Telemedicine triage demo.
///
/// Each subcommand runs one or all of the reference scenarios, or a session
/// built from an intake file.
#[derive(Parser)]
#[command(
    name = "triage-demo",
    about = "Triage session service demo",
    long_about = "Runs triage sessions end to end: intake validation, weighted scoring,\n\
                  urgency classification, specialist recommendation and the audit chain."
)]
struct Cli {
    /// Scoring rules TOML to use instead of the embedded table.
    #[arg(long, global = true, value_name = "PATH")]
    scoring_rules: Option<PathBuf>,

    /// Recommendation rules TOML to use instead of the embedded table.
    #[arg(long, global = true, value_name = "PATH")]
    recommendation_rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all three scenarios in sequence.
    RunAll,
    /// Scenario 1: chest pain scored 8, completed once and referred.
    WorkedExample,
    /// Scenario 2: an emergency outcome escalated.
    Emergency,
    /// Scenario 3: racing completions of one session.
    ConcurrentComplete,
    /// Validate an intake JSON file and run it as a session.
    Intake {
        /// Path to the intake document.
        file: PathBuf,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let rules = RuleSources {
        scoring: cli.scoring_rules,
        recommendations: cli.recommendation_rules,
    };
    debug!(?rules, "rule sources resolved");

    print_banner();

    let result = match cli.command {
        Command::RunAll => run_all(&rules),
        Command::WorkedExample => worked_example::run_scenario(&rules),
        Command::Emergency => emergency::run_scenario(&rules),
        Command::ConcurrentComplete => concurrent_complete::run_scenario(&rules),
        Command::Intake { file } => intake_file::run_file(&rules, &file).map(|_| ()),
    };

    match result {
        Ok(()) => {
            println!("Done.");
        }
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_all(rules: &RuleSources) -> TriageResult<()> {
    worked_example::run_scenario(rules)?;
    emergency::run_scenario(rules)?;
    concurrent_complete::run_scenario(rules)?;
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("Telemedicine Triage");
    println!("Session Service Demo");
    println!("====================");
    println!();
    println!("Per session:");
    println!("  [1] Intake sections validated and stored (symptoms/answers replace, vitals/history merge)");
    println!("  [2] Completion scores symptoms 0.4 + vitals 0.3 + assessment 0.3, rounded into 1..=10");
    println!("  [3] Score mapped to urgency, action and emergency flag; specialist picked by keyword");
    println!("  [4] Outcome verified, session frozen, every operation appended to the SHA-256 chain");
    println!();
}
