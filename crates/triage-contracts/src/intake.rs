//! Patient-reported intake data accumulated by a triage session.
//!
//! Symptoms and assessment answers are replaced wholesale on every update.
//! Vital signs and medical history are merged field by field: a field that is
//! present in the update overwrites the stored one, an absent field leaves the
//! stored value untouched. The merge is shallow, so a supplied
//! `blood_pressure` replaces the stored reading as a whole.

use serde::{Deserialize, Serialize};

/// One reported symptom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symptom {
    /// Free-text description, e.g. "chest pain".
    pub symptom: String,
    /// Patient-rated severity, expected in 1..=10.
    ///
    /// Kept signed so out-of-range values from a leaky ingestion layer still
    /// deserialize; the scoring engine clamps its final result instead.
    pub severity: i32,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub frequency: String,
}

impl Symptom {
    /// Build a symptom with empty duration and frequency.
    pub fn new(symptom: impl Into<String>, severity: i32) -> Self {
        Self {
            symptom: symptom.into(),
            severity,
            duration: String::new(),
            frequency: String::new(),
        }
    }
}

/// One answered assessment question and its weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentAnswer {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    /// Contribution of this answer to the assessment component (0..=10 scale).
    pub weight: f64,
}

impl AssessmentAnswer {
    pub fn new(question: impl Into<String>, answer: impl Into<String>, weight: f64) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            weight,
        }
    }
}

/// A blood pressure reading in mmHg.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodPressure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub systolic: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diastolic: Option<f64>,
}

/// Vital signs recorded during intake. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalSigns {
    /// Body temperature in °F.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<BloodPressure>,
    /// Beats per minute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respiratory_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oxygen_saturation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_sugar: Option<f64>,
}

impl VitalSigns {
    /// Shallow-merge `update` into `self`.
    pub fn merge(&mut self, update: VitalSigns) {
        merge_field(&mut self.temperature, update.temperature);
        merge_field(&mut self.blood_pressure, update.blood_pressure);
        merge_field(&mut self.heart_rate, update.heart_rate);
        merge_field(&mut self.respiratory_rate, update.respiratory_rate);
        merge_field(&mut self.oxygen_saturation, update.oxygen_saturation);
        merge_field(&mut self.blood_sugar, update.blood_sugar);
    }

    /// Systolic pressure, if a blood pressure reading carries one.
    pub fn systolic(&self) -> Option<f64> {
        self.blood_pressure.and_then(|bp| bp.systolic)
    }
}

/// Medical history lists. Every list is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalHistory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chronic_conditions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_medications: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_surgeries: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_history: Option<Vec<String>>,
}

impl MedicalHistory {
    /// Shallow-merge `update` into `self`. A supplied list replaces the stored one.
    pub fn merge(&mut self, update: MedicalHistory) {
        merge_field(&mut self.chronic_conditions, update.chronic_conditions);
        merge_field(&mut self.current_medications, update.current_medications);
        merge_field(&mut self.allergies, update.allergies);
        merge_field(&mut self.recent_surgeries, update.recent_surgeries);
        merge_field(&mut self.family_history, update.family_history);
    }
}

fn merge_field<T>(current: &mut Option<T>, update: Option<T>) {
    if update.is_some() {
        *current = update;
    }
}
