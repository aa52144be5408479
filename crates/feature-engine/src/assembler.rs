//! Feature Record Assembly

use crate::categories::{ActivityLevel, AlcoholConsumption, Gender, SmokingHistory};
use crate::features::FeatureRecord;
use data_validator::domain::{self, FieldDomain};
use data_validator::Validator;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Raw form values for one patient.
///
/// Numbers are free-form; the assembler brings them into their domains.
/// Missing JSON fields take the form defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientInputs {
    // Demographics
    pub age: f64,
    pub gender: Gender,
    /// Only read when gender is Female
    pub pregnancies: f64,

    // Medical measurements
    pub glucose: f64,
    pub blood_pressure: f64,
    pub skin_thickness: f64,
    pub insulin: f64,
    pub bmi: f64,
    pub hba1c: f64,
    pub triglycerides: f64,
    pub resting_heart_rate: f64,
    pub waist_to_hip_ratio: f64,

    // Lifestyle and history
    pub smoking: SmokingHistory,
    pub alcohol: AlcoholConsumption,
    pub activity: ActivityLevel,
    #[serde(with = "crate::flag")]
    pub hypertension: bool,
    #[serde(with = "crate::flag")]
    pub heart_disease: bool,
    #[serde(with = "crate::flag")]
    pub family_history: bool,
    pub metabolic_score: f64,
    pub obesity_risk: f64,
    pub chronic_sugar_load: f64,
}

impl Default for PatientInputs {
    fn default() -> Self {
        Self {
            age: domain::AGE.default,
            gender: Gender::default(),
            pregnancies: domain::PREGNANCIES.default,
            glucose: domain::GLUCOSE.default,
            blood_pressure: domain::BLOOD_PRESSURE.default,
            skin_thickness: domain::SKIN_THICKNESS.default,
            insulin: domain::INSULIN.default,
            bmi: domain::BMI.default,
            hba1c: domain::HBA1C.default,
            triglycerides: domain::TRIGLYCERIDES.default,
            resting_heart_rate: domain::RESTING_HEART_RATE.default,
            waist_to_hip_ratio: domain::WAIST_TO_HIP_RATIO.default,
            smoking: SmokingHistory::default(),
            alcohol: AlcoholConsumption::default(),
            activity: ActivityLevel::default(),
            hypertension: false,
            heart_disease: false,
            family_history: false,
            metabolic_score: domain::METABOLIC_SCORE.default,
            obesity_risk: domain::OBESITY_RISK.default,
            chronic_sugar_load: domain::CHRONIC_SUGAR_LOAD.default,
        }
    }
}

/// Assembles feature records from form inputs
#[derive(Debug, Default, Clone)]
pub struct FeatureAssembler {
    validator: Validator,
}

impl FeatureAssembler {
    /// Create a new assembler
    pub fn new() -> Self {
        Self {
            validator: Validator::new(),
        }
    }

    /// Build a feature record. Never fails: out-of-domain values are clamped.
    pub fn assemble(&self, inputs: &PatientInputs) -> FeatureRecord {
        let pregnancies = if inputs.gender == Gender::Female {
            self.integer(inputs.pregnancies, &domain::PREGNANCIES)
        } else {
            if inputs.pregnancies != 0.0 {
                debug!(
                    "Ignoring pregnancies={} for gender {}",
                    inputs.pregnancies, inputs.gender
                );
            }
            0
        };

        let record = FeatureRecord {
            age: self.integer(inputs.age, &domain::AGE),
            gender: inputs.gender,
            bmi: self.real(inputs.bmi, &domain::BMI),
            waist_to_hip_ratio: self.real(inputs.waist_to_hip_ratio, &domain::WAIST_TO_HIP_RATIO),
            glucose: self.integer(inputs.glucose, &domain::GLUCOSE),
            hba1c: self.real(inputs.hba1c, &domain::HBA1C),
            blood_pressure: self.integer(inputs.blood_pressure, &domain::BLOOD_PRESSURE),
            insulin: self.integer(inputs.insulin, &domain::INSULIN),
            skin_thickness: self.integer(inputs.skin_thickness, &domain::SKIN_THICKNESS),
            triglycerides: self.integer(inputs.triglycerides, &domain::TRIGLYCERIDES),
            resting_heart_rate: self.integer(inputs.resting_heart_rate, &domain::RESTING_HEART_RATE),
            alcohol: inputs.alcohol,
            smoking: inputs.smoking,
            activity: inputs.activity,
            hypertension: inputs.hypertension,
            heart_disease: inputs.heart_disease,
            family_history: inputs.family_history,
            pregnancies,
            metabolic_score: self.integer(inputs.metabolic_score, &domain::METABOLIC_SCORE),
            obesity_risk: self.real(inputs.obesity_risk, &domain::OBESITY_RISK),
            chronic_sugar_load: self.real(inputs.chronic_sugar_load, &domain::CHRONIC_SUGAR_LOAD),
        };

        debug!(
            "Assembled feature record: age={}, gender={}, glucose={}, hba1c={}",
            record.age, record.gender, record.glucose, record.hba1c
        );
        record
    }

    fn real(&self, value: f64, domain: &FieldDomain) -> f64 {
        self.validator.clamp(value, domain).value
    }

    // Integer domains have non-negative integral bounds, so the cast is exact.
    fn integer(&self, value: f64, domain: &FieldDomain) -> u32 {
        self.validator.clamp(value, domain).value.round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defaults() {
        let record = FeatureAssembler::new().assemble(&PatientInputs::default());
        assert_eq!(record.age(), 30);
        assert_eq!(record.gender(), Gender::Male);
        assert_eq!(record.glucose(), 120);
        assert_eq!(record.hba1c(), 6.5);
        assert_eq!(record.bmi(), 25.0);
        assert_eq!(record.pregnancies(), 0);
    }

    #[test]
    fn test_pregnancies_kept_for_female() {
        let inputs = PatientInputs {
            gender: Gender::Female,
            pregnancies: 3.0,
            ..Default::default()
        };
        assert_eq!(FeatureAssembler::new().assemble(&inputs).pregnancies(), 3);
    }

    #[test]
    fn test_pregnancies_zeroed_otherwise() {
        let assembler = FeatureAssembler::new();
        for gender in [Gender::Male, Gender::Transgender] {
            let inputs = PatientInputs {
                gender,
                pregnancies: 4.0,
                ..Default::default()
            };
            assert_eq!(assembler.assemble(&inputs).pregnancies(), 0);
        }
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let inputs = PatientInputs {
            age: 12.0,
            glucose: 1000.0,
            hba1c: f64::NAN,
            gender: Gender::Female,
            pregnancies: 35.0,
            ..Default::default()
        };
        let record = FeatureAssembler::new().assemble(&inputs);
        assert_eq!(record.age(), 18);
        assert_eq!(record.glucose(), 400);
        assert_eq!(record.hba1c(), 6.5);
        assert_eq!(record.pregnancies(), 20);
    }

    #[test]
    fn test_integer_fields_round() {
        let inputs = PatientInputs {
            age: 44.6,
            ..Default::default()
        };
        assert_eq!(FeatureAssembler::new().assemble(&inputs).age(), 45);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let inputs: PatientInputs =
            serde_json::from_str(r#"{"age": 52, "gender": "Female", "pregnancies": 2, "hypertension": 1}"#)
                .unwrap();
        assert_eq!(inputs.age, 52.0);
        assert!(inputs.hypertension);
        assert_eq!(inputs.glucose, 120.0);
        assert_eq!(inputs.smoking, SmokingHistory::Never);
    }

    #[test]
    fn test_flag_rejects_other_integers() {
        let result: Result<PatientInputs, _> = serde_json::from_str(r#"{"heart_disease": 2}"#);
        assert!(result.is_err());
    }

    fn any_gender() -> impl Strategy<Value = Gender> {
        prop::sample::select(Gender::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn pregnancies_zero_unless_female(
            gender in any_gender(),
            pregnancies in -10.0f64..50.0,
            age in 0.0f64..150.0,
        ) {
            let inputs = PatientInputs { gender, pregnancies, age, ..Default::default() };
            let record = FeatureAssembler::new().assemble(&inputs);
            if gender != Gender::Female {
                prop_assert_eq!(record.pregnancies(), 0);
            }
            prop_assert!(record.pregnancies() <= 20);
            prop_assert!((18..=100).contains(&record.age()));
        }
    }
}
