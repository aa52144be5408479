//! Feature Record
//!
//! The fixed-order record consumed by the classifier. Names and order must
//! match the training frame exactly.

use crate::categories::{ActivityLevel, AlcoholConsumption, Gender, SmokingHistory};
use serde::Serialize;

/// Number of features in the record
pub const FEATURE_COUNT: usize = 21;

/// Kind of a feature column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    /// Real or integer valued column
    Numeric,
    /// String-valued column with its levels in encoding order
    Categorical(&'static [&'static str]),
}

/// Name and kind of one feature column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSpec {
    pub name: &'static str,
    pub kind: FeatureKind,
}

const fn numeric(name: &'static str) -> FeatureSpec {
    FeatureSpec {
        name,
        kind: FeatureKind::Numeric,
    }
}

const fn categorical(name: &'static str, levels: &'static [&'static str]) -> FeatureSpec {
    FeatureSpec {
        name,
        kind: FeatureKind::Categorical(levels),
    }
}

/// Column schema in model order
pub const FEATURE_SCHEMA: [FeatureSpec; FEATURE_COUNT] = [
    numeric("Age (years)"),
    categorical(Gender::FEATURE, Gender::LEVELS),
    numeric("BMI (kg/m2)"),
    numeric("WaistToHipRatio"),
    numeric("BloodGlucoseLevel (mg/dL)"),
    numeric("HbA1cLevel (%)"),
    numeric("BloodPressure (mmHg)"),
    numeric("Insulin (µU/mL)"),
    numeric("SkinThickness (mm)"),
    numeric("Triglycerides (mg/dL)"),
    numeric("RestingHeartRate (bpm)"),
    categorical(AlcoholConsumption::FEATURE, AlcoholConsumption::LEVELS),
    categorical(SmokingHistory::FEATURE, SmokingHistory::LEVELS),
    categorical(ActivityLevel::FEATURE, ActivityLevel::LEVELS),
    numeric("Hypertension (0/1)"),
    numeric("HeartDisease (0/1)"),
    numeric("FamilyHistory (0/1)"),
    numeric("Pregnancies"),
    numeric("Metabolic_Score (count_0-4)"),
    numeric("Obesity_Risk (kg/m2 * years)"),
    numeric("Chronic_Sugar_Load (mg/dL * %)"),
];

/// Column names in model order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = {
    let mut names = [""; FEATURE_COUNT];
    let mut i = 0;
    while i < FEATURE_COUNT {
        names[i] = FEATURE_SCHEMA[i].name;
        i += 1;
    }
    names
};

/// One cell of the record
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue {
    Numeric(f64),
    Categorical(&'static str),
}

/// Feature record for one prediction request.
///
/// Only [`crate::FeatureAssembler`] builds records, so every record respects
/// the input domains and the pregnancies rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRecord {
    #[serde(rename = "Age (years)")]
    pub(crate) age: u32,
    #[serde(rename = "Gender")]
    pub(crate) gender: Gender,
    #[serde(rename = "BMI (kg/m2)")]
    pub(crate) bmi: f64,
    #[serde(rename = "WaistToHipRatio")]
    pub(crate) waist_to_hip_ratio: f64,
    #[serde(rename = "BloodGlucoseLevel (mg/dL)")]
    pub(crate) glucose: u32,
    #[serde(rename = "HbA1cLevel (%)")]
    pub(crate) hba1c: f64,
    #[serde(rename = "BloodPressure (mmHg)")]
    pub(crate) blood_pressure: u32,
    #[serde(rename = "Insulin (µU/mL)")]
    pub(crate) insulin: u32,
    #[serde(rename = "SkinThickness (mm)")]
    pub(crate) skin_thickness: u32,
    #[serde(rename = "Triglycerides (mg/dL)")]
    pub(crate) triglycerides: u32,
    #[serde(rename = "RestingHeartRate (bpm)")]
    pub(crate) resting_heart_rate: u32,
    #[serde(rename = "AlcoholConsumption")]
    pub(crate) alcohol: AlcoholConsumption,
    #[serde(rename = "SmokingHistory")]
    pub(crate) smoking: SmokingHistory,
    #[serde(rename = "PhysicalActivityLevel")]
    pub(crate) activity: ActivityLevel,
    #[serde(rename = "Hypertension (0/1)", serialize_with = "crate::flag::serialize")]
    pub(crate) hypertension: bool,
    #[serde(rename = "HeartDisease (0/1)", serialize_with = "crate::flag::serialize")]
    pub(crate) heart_disease: bool,
    #[serde(rename = "FamilyHistory (0/1)", serialize_with = "crate::flag::serialize")]
    pub(crate) family_history: bool,
    #[serde(rename = "Pregnancies")]
    pub(crate) pregnancies: u32,
    #[serde(rename = "Metabolic_Score (count_0-4)")]
    pub(crate) metabolic_score: u32,
    #[serde(rename = "Obesity_Risk (kg/m2 * years)")]
    pub(crate) obesity_risk: f64,
    #[serde(rename = "Chronic_Sugar_Load (mg/dL * %)")]
    pub(crate) chronic_sugar_load: f64,
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

impl FeatureRecord {
    /// Ordered cells, one per entry of [`FEATURE_SCHEMA`]
    pub fn values(&self) -> [FeatureValue; FEATURE_COUNT] {
        use FeatureValue::{Categorical, Numeric};
        [
            Numeric(f64::from(self.age)),
            Categorical(self.gender.as_str()),
            Numeric(self.bmi),
            Numeric(self.waist_to_hip_ratio),
            Numeric(f64::from(self.glucose)),
            Numeric(self.hba1c),
            Numeric(f64::from(self.blood_pressure)),
            Numeric(f64::from(self.insulin)),
            Numeric(f64::from(self.skin_thickness)),
            Numeric(f64::from(self.triglycerides)),
            Numeric(f64::from(self.resting_heart_rate)),
            Categorical(self.alcohol.as_str()),
            Categorical(self.smoking.as_str()),
            Categorical(self.activity.as_str()),
            Numeric(flag(self.hypertension)),
            Numeric(flag(self.heart_disease)),
            Numeric(flag(self.family_history)),
            Numeric(f64::from(self.pregnancies)),
            Numeric(f64::from(self.metabolic_score)),
            Numeric(self.obesity_risk),
            Numeric(self.chronic_sugar_load),
        ]
    }

    /// Dense encoding for tensor runtimes: categoricals become their ordinal
    /// index in the level list.
    pub fn to_ordinal_vec(&self) -> Vec<f32> {
        self.values()
            .iter()
            .zip(FEATURE_SCHEMA.iter())
            .map(|(value, spec)| match (value, spec.kind) {
                (FeatureValue::Numeric(v), _) => *v as f32,
                (FeatureValue::Categorical(level), FeatureKind::Categorical(levels)) => {
                    levels.iter().position(|l| l == level).unwrap_or(0) as f32
                }
                (FeatureValue::Categorical(_), FeatureKind::Numeric) => 0.0,
            })
            .collect()
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn pregnancies(&self) -> u32 {
        self.pregnancies
    }

    pub fn glucose(&self) -> u32 {
        self.glucose
    }

    pub fn hba1c(&self) -> f64 {
        self.hba1c
    }

    pub fn bmi(&self) -> f64 {
        self.bmi
    }
}
