//! Validation and verification report types.
//!
//! Intake payloads are validated before they are deserialized into typed
//! updates; completed outcomes are verified before they are persisted. Both
//! produce a `VerificationReport` listing every failure found.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of raw intake payload being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntakeKind {
    Symptoms,
    Vitals,
    History,
    Assessment,
}

impl IntakeKind {
    pub const ALL: [IntakeKind; 4] = [
        IntakeKind::Symptoms,
        IntakeKind::Vitals,
        IntakeKind::History,
        IntakeKind::Assessment,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Symptoms => "symptoms",
            Self::Vitals => "vitals",
            Self::History => "history",
            Self::Assessment => "assessment",
        }
    }
}

impl fmt::Display for IntakeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of running all checks against one value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerificationReport {
    /// True only if every check passed.
    pub passed: bool,
    /// All failures collected during this run. Empty on pass.
    pub failures: Vec<VerificationFailure>,
}

impl VerificationReport {
    pub fn from_failures(failures: Vec<VerificationFailure>) -> Self {
        Self {
            passed: failures.is_empty(),
            failures,
        }
    }

    /// Join every failure into one `[rule] message; ...` line.
    pub fn summary(&self) -> String {
        self.failures
            .iter()
            .map(|f| format!("[{}] {}", f.rule_id, f.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A single failed check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationFailure {
    pub rule_id: String,
    pub message: String,
}

impl VerificationFailure {
    pub fn new(rule_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule_id: rule_id.into(),
            message: message.into(),
        }
    }
}
