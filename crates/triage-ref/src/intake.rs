//! Whole-session intakes: everything a patient submits before completion.
//!
//! An `Intake` is the typed form the scenarios build by hand. An intake file
//! is the same data as raw JSON; `Intake::from_json` validates every section
//! against its schema before deserializing it, so a bad file is rejected with
//! the full list of problems.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use triage_contracts::{
    error::{TriageError, TriageResult},
    intake::{AssessmentAnswer, MedicalHistory, Symptom, VitalSigns},
    session::{PatientId, SessionId},
    verify::IntakeKind,
};
use triage_core::TriageService;
use triage_verify::IntakeValidator;

/// Everything submitted for one session.
#[derive(Debug, Clone)]
pub struct Intake {
    pub patient_id: PatientId,
    pub symptoms: Vec<Symptom>,
    pub vital_signs: VitalSigns,
    pub medical_history: MedicalHistory,
    pub assessment_answers: Vec<AssessmentAnswer>,
}

/// The on-disk layout. Sections are kept raw until validated.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntakeFile {
    patient_id: String,
    #[serde(default)]
    symptoms: Option<Value>,
    #[serde(default)]
    vital_signs: Option<Value>,
    #[serde(default)]
    medical_history: Option<Value>,
    #[serde(default)]
    assessment_answers: Option<Value>,
}

impl Intake {
    /// Parse and validate an intake document.
    ///
    /// Every section that fails its schema is reported, not just the first.
    pub fn from_json(text: &str) -> TriageResult<Self> {
        let file: IntakeFile = serde_json::from_str(text).map_err(|e| TriageError::InvalidInput {
            reason: format!("intake is not valid JSON: {}", e),
        })?;
        if file.patient_id.trim().is_empty() {
            return Err(TriageError::InvalidInput {
                reason: "intake has a blank patientId".to_string(),
            });
        }

        let validator = IntakeValidator::new();
        let sections = [
            (IntakeKind::Symptoms, &file.symptoms),
            (IntakeKind::Vitals, &file.vital_signs),
            (IntakeKind::History, &file.medical_history),
            (IntakeKind::Assessment, &file.assessment_answers),
        ];
        let problems: Vec<String> = sections
            .iter()
            .filter_map(|(kind, section)| {
                let report = validator.validate(*kind, section.as_ref()?);
                (!report.passed).then(|| report.summary())
            })
            .collect();
        if !problems.is_empty() {
            return Err(TriageError::InvalidInput {
                reason: format!("intake rejected: {}", problems.join("; ")),
            });
        }

        Ok(Self {
            patient_id: PatientId::new(file.patient_id),
            symptoms: parse_section(&validator, IntakeKind::Symptoms, file.symptoms)?,
            vital_signs: parse_section(&validator, IntakeKind::Vitals, file.vital_signs)?,
            medical_history: parse_section(&validator, IntakeKind::History, file.medical_history)?,
            assessment_answers: parse_section(&validator, IntakeKind::Assessment, file.assessment_answers)?,
        })
    }

    pub fn from_file(path: &Path) -> TriageResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| TriageError::InvalidInput {
            reason: format!("failed to read intake file '{}': {}", path.display(), e),
        })?;
        info!(path = %path.display(), "intake file loaded");
        Self::from_json(&text)
    }

    /// Start a session and submit every section, in the order a client would.
    pub fn submit(&self, service: &TriageService) -> TriageResult<SessionId> {
        let session_id = service.start(self.patient_id.clone())?;
        service.update_symptoms(&session_id, &self.patient_id, self.symptoms.clone())?;
        service.update_vitals(&session_id, &self.patient_id, self.vital_signs.clone())?;
        service.update_history(&session_id, &self.patient_id, self.medical_history.clone())?;
        service.update_assessment(&session_id, &self.patient_id, self.assessment_answers.clone())?;
        Ok(session_id)
    }
}

/// Deserialize an optional section, defaulting when it is absent.
fn parse_section<T: Default + serde::de::DeserializeOwned>(
    validator: &IntakeValidator,
    kind: IntakeKind,
    raw: Option<Value>,
) -> TriageResult<T> {
    match raw {
        Some(value) => validator.parse(kind, value),
        None => Ok(T::default()),
    }
}
