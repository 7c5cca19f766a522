//! Scoring rule types and configuration schema.
//!
//! A `ScoringConfig` is deserialized from TOML and holds the three
//! component weights plus an ordered list of vital-sign rules. Each vital
//! rule holds ordered bands; the first band whose limit is crossed wins.

use serde::{Deserialize, Serialize};

use triage_contracts::intake::VitalSigns;

/// A vital sign the scoring rules can refer to.
///
/// Expressed in TOML as kebab-case strings:
/// ```toml
/// sign = "temperature"
/// sign = "systolic-pressure"
/// sign = "heart-rate"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VitalSign {
    Temperature,
    SystolicPressure,
    DiastolicPressure,
    HeartRate,
    RespiratoryRate,
    OxygenSaturation,
    BloodSugar,
}

impl VitalSign {
    /// Read this sign from a vitals record. `None` means "not supplied".
    pub fn read(self, vitals: &VitalSigns) -> Option<f64> {
        match self {
            Self::Temperature => vitals.temperature,
            Self::SystolicPressure => vitals.systolic(),
            Self::DiastolicPressure => vitals.blood_pressure.and_then(|bp| bp.diastolic),
            Self::HeartRate => vitals.heart_rate,
            Self::RespiratoryRate => vitals.respiratory_rate,
            Self::OxygenSaturation => vitals.oxygen_saturation,
            Self::BloodSugar => vitals.blood_sugar,
        }
    }
}

/// One abnormal range of a vital sign.
///
/// A reading falls in the band when it is strictly greater than `above` or
/// strictly less than `below`. Either limit may be omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalBand {
    /// Human-readable name ("danger", "borderline"), used in debug logs.
    pub label: String,
    pub above: Option<f64>,
    pub below: Option<f64>,
    pub points: f64,
}

impl VitalBand {
    pub fn contains(&self, value: f64) -> bool {
        self.above.is_some_and(|limit| value > limit)
            || self.below.is_some_and(|limit| value < limit)
    }
}

/// The point table for one scored vital sign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalRule {
    pub sign: VitalSign,

    #[serde(default)]
    pub description: String,

    /// Points for a reading that falls in none of the bands.
    pub normal_points: f64,

    /// Bands in priority order. First match wins.
    #[serde(default)]
    pub bands: Vec<VitalBand>,
}

impl VitalRule {
    /// The band a reading falls in, if any.
    pub fn band_for(&self, value: f64) -> Option<&VitalBand> {
        self.bands.iter().find(|band| band.contains(value))
    }

    /// Points awarded for `value`.
    pub fn points_for(&self, value: f64) -> f64 {
        self.band_for(value)
            .map_or(self.normal_points, |band| band.points)
    }
}

/// Coefficients applied to each averaged component before summation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentWeights {
    pub symptoms: f64,
    pub vitals: f64,
    pub assessment: f64,
}

/// The top-level structure deserialized from a TOML scoring file.
///
/// Example:
/// ```toml
/// [weights]
/// symptoms = 0.4
/// vitals = 0.3
/// assessment = 0.3
///
/// [[vitals]]
/// sign = "heart-rate"
/// normal_points = 1
///
/// [[vitals.bands]]
/// label = "danger"
/// above = 120.0
/// below = 50.0
/// points = 8
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: ComponentWeights,

    /// Scored vital signs. A sign absent from this list never affects the score.
    #[serde(default)]
    pub vitals: Vec<VitalRule>,
}

impl ScoringConfig {
    /// Check the values serde cannot: finiteness, sign, and one rule per vital.
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        let weights = [
            ("symptoms", self.weights.symptoms),
            ("vitals", self.weights.vitals),
            ("assessment", self.weights.assessment),
        ];
        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(format!("weight '{name}' must be a finite, non-negative number"));
            }
        }

        let mut seen = Vec::new();
        for rule in &self.vitals {
            if seen.contains(&rule.sign) {
                return Err(format!("vital sign {:?} is listed more than once", rule.sign));
            }
            seen.push(rule.sign);

            if !rule.normal_points.is_finite() {
                return Err(format!("normal_points for {:?} must be finite", rule.sign));
            }
            for band in &rule.bands {
                if !band.points.is_finite() {
                    return Err(format!(
                        "band '{}' for {:?} must have finite points",
                        band.label, rule.sign
                    ));
                }
                if band.above.is_none() && band.below.is_none() {
                    return Err(format!(
                        "band '{}' for {:?} needs an 'above' or 'below' limit",
                        band.label, rule.sign
                    ));
                }
            }
        }
        Ok(())
    }
}
