//! Raw intake validation.
//!
//! `IntakeValidator` checks a client's JSON payload against the schema for
//! its update kind before it is deserialized into a typed update. Every
//! violation is collected so the client sees all of them at once.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use triage_contracts::{
    error::{TriageError, TriageResult},
    verify::{IntakeKind, VerificationFailure, VerificationReport},
};

use crate::schema::intake_schema;

/// Run `schema` against `instance`, one failure per violation.
///
/// A schema that does not compile is reported as a single failure.
pub(crate) fn schema_failures(
    rule_id: &str,
    schema: &Value,
    instance: &Value,
) -> Vec<VerificationFailure> {
    match jsonschema::validator_for(schema) {
        Ok(validator) => validator
            .iter_errors(instance)
            .map(|error| {
                let message = format!(
                    "JSON Schema violation at {}: {}",
                    error.instance_path, error
                );
                warn!(rule_id, %message, "structural validation failure");
                VerificationFailure::new(rule_id, message)
            })
            .collect(),
        Err(e) => {
            let message = format!("invalid JSON Schema document: {e}");
            warn!(rule_id, %message, "schema compilation failure");
            vec![VerificationFailure::new(rule_id, message)]
        }
    }
}

/// Validates intake payloads against the built-in schemas.
#[derive(Debug, Default, Clone, Copy)]
pub struct IntakeValidator;

impl IntakeValidator {
    pub fn new() -> Self {
        Self
    }

    /// Check `payload` against the schema for `kind`.
    pub fn validate(&self, kind: IntakeKind, payload: &Value) -> VerificationReport {
        let rule_id = format!("{}-schema", kind);
        let report =
            VerificationReport::from_failures(schema_failures(&rule_id, &intake_schema(kind), payload));
        debug!(
            kind = %kind,
            passed = report.passed,
            failure_count = report.failures.len(),
            "intake validated"
        );
        report
    }

    /// Validate `payload`, then deserialize it.
    ///
    /// Fails with `TriageError::InvalidInput` carrying every schema violation,
    /// or the deserialization error if the payload passed the schema but
    /// still does not fit `T`.
    pub fn parse<T: DeserializeOwned>(&self, kind: IntakeKind, payload: Value) -> TriageResult<T> {
        let report = self.validate(kind, &payload);
        if !report.passed {
            return Err(TriageError::InvalidInput {
                reason: format!("{} payload rejected: {}", kind, report.summary()),
            });
        }
        serde_json::from_value(payload).map_err(|e| TriageError::InvalidInput {
            reason: format!("{} payload could not be read: {}", kind, e),
        })
    }
}
