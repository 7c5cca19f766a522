//! Fictional patient intakes for the reference scenarios.
//!
//! All data in this module is hardcoded and fictional.

use triage_contracts::{
    intake::{AssessmentAnswer, BloodPressure, MedicalHistory, Symptom, VitalSigns},
    session::{DoctorId, PatientId},
};

use crate::intake::Intake;

fn symptom(text: &str, severity: i32, duration: &str, frequency: &str) -> Symptom {
    Symptom {
        symptom: text.to_string(),
        severity,
        duration: duration.to_string(),
        frequency: frequency.to_string(),
    }
}

fn strings(items: &[&str]) -> Option<Vec<String>> {
    Some(items.iter().map(|s| s.to_string()).collect())
}

/// Chest pain with high fever, hypertension and tachycardia.
///
/// Components: 8 × 0.4 = 3.2; mean(8, 9, 8) × 0.3 = 2.5; 9 × 0.3 = 2.7.
/// Sum 8.4 rounds to 8: critical, seek immediate care, cardiologist.
pub fn worked_example() -> Intake {
    Intake {
        patient_id: PatientId::new("patient-0417"),
        symptoms: vec![symptom("Chest pain", 8, "3 hours", "constant")],
        vital_signs: VitalSigns {
            temperature: Some(103.0),
            blood_pressure: Some(BloodPressure {
                systolic: Some(190.0),
                diastolic: Some(110.0),
            }),
            heart_rate: Some(130.0),
            ..Default::default()
        },
        medical_history: MedicalHistory {
            chronic_conditions: strings(&["hypertension"]),
            current_medications: strings(&["lisinopril"]),
            ..Default::default()
        },
        assessment_answers: vec![AssessmentAnswer::new(
            "Does the pain spread to your arm or jaw?",
            "yes",
            9.0,
        )],
    }
}

/// Crushing chest pain with breathing difficulty and extreme vitals.
///
/// Components: 9.5 × 0.4 = 3.8; 2.5; 9.5 × 0.3 = 2.85. Sum 9.15 rounds to 9.
pub fn emergency() -> Intake {
    Intake {
        patient_id: PatientId::new("patient-0932"),
        symptoms: vec![
            symptom("Crushing chest pain", 10, "40 minutes", "constant"),
            symptom("Difficulty breathing", 9, "30 minutes", "constant"),
        ],
        vital_signs: VitalSigns {
            temperature: Some(103.5),
            blood_pressure: Some(BloodPressure {
                systolic: Some(195.0),
                diastolic: Some(120.0),
            }),
            heart_rate: Some(135.0),
            oxygen_saturation: Some(88.0),
            ..Default::default()
        },
        medical_history: MedicalHistory {
            chronic_conditions: strings(&["type 2 diabetes", "hyperlipidemia"]),
            family_history: strings(&["myocardial infarction"]),
            ..Default::default()
        },
        assessment_answers: vec![
            AssessmentAnswer::new("Is the pain getting worse?", "yes", 10.0),
            AssessmentAnswer::new("Are you sweating or lightheaded?", "yes", 9.0),
        ],
    }
}

/// A mild cough with normal vitals.
///
/// Components: 3 × 0.4 = 1.2; mean(2, 1) × 0.3 = 0.45; 2 × 0.3 = 0.6.
/// Sum 2.25 rounds to 2: low, self-care, pulmonologist.
pub fn routine_cough() -> Intake {
    Intake {
        patient_id: PatientId::new("patient-1188"),
        symptoms: vec![symptom("Dry cough", 3, "4 days", "intermittent")],
        vital_signs: VitalSigns {
            temperature: Some(98.9),
            heart_rate: Some(72.0),
            respiratory_rate: Some(16.0),
            ..Default::default()
        },
        medical_history: MedicalHistory {
            allergies: strings(&["penicillin"]),
            ..Default::default()
        },
        assessment_answers: vec![AssessmentAnswer::new(
            "Are you coughing up blood?",
            "no",
            2.0,
        )],
    }
}

/// The on-call cardiologist critical sessions are referred to.
pub fn on_call_cardiologist() -> DoctorId {
    DoctorId::new("dr-cardiology-oncall")
}

/// An intake document in the file format accepted by `Intake::from_json`.
pub const SAMPLE_INTAKE_JSON: &str = r#"{
  "patientId": "patient-2051",
  "symptoms": [
    { "symptom": "Persistent headache", "severity": 6, "duration": "2 days", "frequency": "constant" },
    { "symptom": "Dizziness", "severity": 5, "duration": "1 day", "frequency": "when standing" }
  ],
  "vitalSigns": {
    "temperature": 99.1,
    "bloodPressure": { "systolic": 150, "diastolic": 95 },
    "heartRate": 92
  },
  "medicalHistory": {
    "currentMedications": ["ibuprofen"],
    "allergies": []
  },
  "assessmentAnswers": [
    { "question": "Is this the worst headache of your life?", "answer": "no", "weight": 4 },
    { "question": "Any vision changes?", "answer": "slightly blurred", "weight": 6 }
  ]
}"#;
