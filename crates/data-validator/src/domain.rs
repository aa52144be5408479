//! Numeric Input Domains
//!
//! Min/max/default for every numeric field of the patient form. Integer
//! fields carry integral bounds; the assembler rounds after clamping.

use serde::Serialize;

/// Allowed range and default value of one numeric input
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldDomain {
    /// Feature name as the model expects it
    pub name: &'static str,
    /// Inclusive lower bound
    pub min: f64,
    /// Inclusive upper bound
    pub max: f64,
    /// Value used when the form leaves the field untouched
    pub default: f64,
}

impl FieldDomain {
    /// Create a bounded domain
    pub const fn new(name: &'static str, min: f64, max: f64, default: f64) -> Self {
        Self {
            name,
            min,
            max,
            default,
        }
    }

    /// Create a domain with no bounds (free number input)
    pub const fn unbounded(name: &'static str, default: f64) -> Self {
        Self {
            name,
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
            default,
        }
    }

    /// Whether both bounds are finite
    pub fn is_bounded(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Whether the value lies inside the domain
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const AGE: FieldDomain = FieldDomain::new("Age (years)", 18.0, 100.0, 30.0);
pub const BMI: FieldDomain = FieldDomain::new("BMI (kg/m2)", 10.0, 70.0, 25.0);
pub const WAIST_TO_HIP_RATIO: FieldDomain = FieldDomain::new("WaistToHipRatio", 0.5, 2.0, 0.9);
pub const GLUCOSE: FieldDomain = FieldDomain::new("BloodGlucoseLevel (mg/dL)", 50.0, 400.0, 120.0);
pub const HBA1C: FieldDomain = FieldDomain::new("HbA1cLevel (%)", 3.0, 15.0, 6.5);
pub const BLOOD_PRESSURE: FieldDomain = FieldDomain::new("BloodPressure (mmHg)", 50.0, 200.0, 80.0);
pub const INSULIN: FieldDomain = FieldDomain::new("Insulin (µU/mL)", 0.0, 900.0, 80.0);
pub const SKIN_THICKNESS: FieldDomain = FieldDomain::new("SkinThickness (mm)", 0.0, 100.0, 20.0);
pub const TRIGLYCERIDES: FieldDomain = FieldDomain::new("Triglycerides (mg/dL)", 50.0, 500.0, 150.0);
pub const RESTING_HEART_RATE: FieldDomain =
    FieldDomain::new("RestingHeartRate (bpm)", 40.0, 150.0, 75.0);
pub const PREGNANCIES: FieldDomain = FieldDomain::new("Pregnancies", 0.0, 20.0, 0.0);
pub const METABOLIC_SCORE: FieldDomain =
    FieldDomain::new("Metabolic_Score (count_0-4)", 0.0, 4.0, 2.0);
pub const OBESITY_RISK: FieldDomain =
    FieldDomain::unbounded("Obesity_Risk (kg/m2 * years)", 1200.0);
pub const CHRONIC_SUGAR_LOAD: FieldDomain =
    FieldDomain::unbounded("Chronic_Sugar_Load (mg/dL * %)", 1000.0);

/// Every numeric domain, in feature order
pub const ALL: [FieldDomain; 14] = [
    AGE,
    BMI,
    WAIST_TO_HIP_RATIO,
    GLUCOSE,
    HBA1C,
    BLOOD_PRESSURE,
    INSULIN,
    SKIN_THICKNESS,
    TRIGLYCERIDES,
    RESTING_HEART_RATE,
    PREGNANCIES,
    METABOLIC_SCORE,
    OBESITY_RISK,
    CHRONIC_SUGAR_LOAD,
];

/// Look up a domain by feature name
pub fn by_name(name: &str) -> Option<&'static FieldDomain> {
    ALL.iter().find(|d| d.name == name)
}
