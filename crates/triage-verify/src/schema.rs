//! Built-in JSON Schema documents.
//!
//! Intake schemas describe the camelCase payloads clients send for each
//! update kind. Vital and history fields may be `null`, which leaves the
//! stored value untouched. Unknown keys are rejected so misspelled fields
//! surface instead of being silently dropped.

use serde_json::{json, Value};

use triage_contracts::verify::IntakeKind;

/// The schema a raw intake payload of `kind` must satisfy.
pub fn intake_schema(kind: IntakeKind) -> Value {
    match kind {
        IntakeKind::Symptoms => symptoms(),
        IntakeKind::Vitals => vitals(),
        IntakeKind::History => history(),
        IntakeKind::Assessment => assessment(),
    }
}

fn symptoms() -> Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "symptom": { "type": "string", "minLength": 1 },
                "severity": { "type": "integer", "minimum": 1, "maximum": 10 },
                "duration": { "type": "string" },
                "frequency": { "type": "string" }
            },
            "required": ["symptom", "severity"],
            "additionalProperties": false
        }
    })
}

fn vitals() -> Value {
    let reading = json!({ "type": ["number", "null"], "minimum": 0 });
    json!({
        "type": "object",
        "properties": {
            "temperature": reading.clone(),
            "bloodPressure": {
                "type": ["object", "null"],
                "properties": {
                    "systolic": reading.clone(),
                    "diastolic": reading.clone()
                },
                "additionalProperties": false
            },
            "heartRate": reading.clone(),
            "respiratoryRate": reading.clone(),
            "oxygenSaturation": { "type": ["number", "null"], "minimum": 0, "maximum": 100 },
            "bloodSugar": reading
        },
        "additionalProperties": false
    })
}

fn history() -> Value {
    let list = json!({
        "type": ["array", "null"],
        "items": { "type": "string" }
    });
    json!({
        "type": "object",
        "properties": {
            "chronicConditions": list.clone(),
            "currentMedications": list.clone(),
            "allergies": list.clone(),
            "recentSurgeries": list.clone(),
            "familyHistory": list
        },
        "additionalProperties": false
    })
}

fn assessment() -> Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "question": { "type": "string", "minLength": 1 },
                "answer": { "type": "string" },
                "weight": { "type": "number", "minimum": 0, "maximum": 10 }
            },
            "required": ["question", "answer", "weight"],
            "additionalProperties": false
        }
    })
}

/// The shape of a serialized `TriageOutcome`.
pub fn outcome_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "sessionId": { "type": "string" },
            "triageScore": { "type": "integer", "minimum": 1, "maximum": 10 },
            "urgencyLevel": {
                "enum": ["low", "medium", "high", "critical", "emergency"]
            },
            "recommendedAction": {
                "enum": [
                    "self-care",
                    "schedule-routine-appointment",
                    "schedule-urgent-appointment",
                    "seek-immediate-care",
                    "call-emergency-services"
                ]
            },
            "aiRecommendation": {
                "type": "object",
                "properties": {
                    "specialistType": { "type": "string", "minLength": 1 },
                    "reasoning": { "type": "string", "minLength": 1 },
                    "suggestedTests": { "type": "array", "items": { "type": "string" } },
                    "timeframe": { "type": "string", "minLength": 1 },
                    "precautions": { "type": "array", "items": { "type": "string" } }
                },
                "required": [
                    "specialistType",
                    "reasoning",
                    "suggestedTests",
                    "timeframe",
                    "precautions"
                ]
            },
            "isEmergency": { "type": "boolean" }
        },
        "required": [
            "sessionId",
            "triageScore",
            "urgencyLevel",
            "recommendedAction",
            "aiRecommendation",
            "isEmergency"
        ]
    })
}
