//! Linear (logistic regression) model artifact.
//!
//! The artifact is a JSON document:
//!
//! ```json
//! {
//!   "name": "diabetes-logit-v1",
//!   "intercept": -1.2,
//!   "features": [
//!     { "name": "Age (years)", "weight": 0.03, "center": 45.0 },
//!     { "name": "Gender", "levels": { "Male": 0.0, "Female": -0.05, "Transgender": 0.0 } }
//!   ]
//! }
//! ```
//!
//! `features` must list every column of the feature record, in order.

use crate::model::RiskModel;
use crate::InferenceError;
use feature_engine::{FeatureKind, FeatureRecord, FeatureValue, FEATURE_COUNT, FEATURE_SCHEMA};
use risk_bands::{logistic, ScoringMode};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LinearArtifact {
    name: String,
    intercept: f64,
    features: Vec<FeatureTerm>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FeatureTerm {
    name: String,
    weight: Option<f64>,
    center: Option<f64>,
    scale: Option<f64>,
    levels: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Clone, PartialEq)]
enum Term {
    Numeric { weight: f64, center: f64, scale: f64 },
    /// Weight per level, indexed like the schema's level list
    Categorical { weights: Vec<f64> },
}

/// Logistic regression over the feature record
#[derive(Debug, Clone)]
pub struct LinearModel {
    name: String,
    intercept: f64,
    terms: Vec<Term>,
}

fn schema_error(message: String) -> InferenceError {
    InferenceError::ModelLoadError(format!("feature schema mismatch: {}", message))
}

impl LinearModel {
    /// Load from a JSON artifact on disk
    pub fn load(path: &Path) -> Result<Self, InferenceError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| InferenceError::ModelLoadError(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&text)
            .map_err(|e| InferenceError::ModelLoadError(format!("{}: {}", path.display(), e)))
    }

    /// Parse and check an artifact against the feature schema
    pub fn from_json(text: &str) -> Result<Self, InferenceError> {
        let artifact: LinearArtifact = serde_json::from_str(text)
            .map_err(|e| InferenceError::ModelLoadError(format!("invalid artifact: {}", e)))?;

        if !artifact.intercept.is_finite() {
            return Err(InferenceError::ModelLoadError("intercept is not finite".into()));
        }
        if artifact.features.len() != FEATURE_COUNT {
            return Err(schema_error(format!(
                "expected {} features, artifact has {}",
                FEATURE_COUNT,
                artifact.features.len()
            )));
        }

        let terms = artifact
            .features
            .into_iter()
            .zip(FEATURE_SCHEMA.iter())
            .enumerate()
            .map(|(i, (term, spec))| {
                if term.name != spec.name {
                    return Err(schema_error(format!(
                        "position {} is '{}', expected '{}'",
                        i, term.name, spec.name
                    )));
                }
                Self::compile_term(term, spec.kind)
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Linear model '{}' compiled with {} terms", artifact.name, terms.len());

        Ok(Self {
            name: artifact.name,
            intercept: artifact.intercept,
            terms,
        })
    }

    fn compile_term(term: FeatureTerm, kind: FeatureKind) -> Result<Term, InferenceError> {
        match (kind, term.weight, term.levels) {
            (FeatureKind::Numeric, Some(weight), None) => {
                let center = term.center.unwrap_or(0.0);
                let scale = term.scale.unwrap_or(1.0);
                if !weight.is_finite() || !center.is_finite() || !scale.is_finite() || scale == 0.0 {
                    return Err(schema_error(format!(
                        "'{}' needs finite weight/center and a non-zero scale",
                        term.name
                    )));
                }
                Ok(Term::Numeric {
                    weight,
                    center,
                    scale,
                })
            }
            (FeatureKind::Categorical(levels), None, Some(mut weights)) => {
                let ordered = levels
                    .iter()
                    .map(|level| {
                        weights
                            .remove(*level)
                            .filter(|w| w.is_finite())
                            .ok_or_else(|| {
                                schema_error(format!(
                                    "'{}' is missing a finite weight for level '{}'",
                                    term.name, level
                                ))
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                if let Some(extra) = weights.keys().next() {
                    return Err(schema_error(format!(
                        "'{}' has unknown level '{}'",
                        term.name, extra
                    )));
                }
                Ok(Term::Categorical { weights: ordered })
            }
            (FeatureKind::Numeric, _, _) => Err(schema_error(format!(
                "'{}' is numeric and needs exactly a 'weight'",
                term.name
            ))),
            (FeatureKind::Categorical(_), _, _) => Err(schema_error(format!(
                "'{}' is categorical and needs exactly 'levels'",
                term.name
            ))),
        }
    }

    fn score(&self, record: &FeatureRecord) -> Result<f64, InferenceError> {
        let mut total = self.intercept;
        for ((value, term), spec) in record
            .values()
            .iter()
            .zip(self.terms.iter())
            .zip(FEATURE_SCHEMA.iter())
        {
            total += match (value, term, spec.kind) {
                (FeatureValue::Numeric(x), Term::Numeric { weight, center, scale }, _) => {
                    weight * (x - center) / scale
                }
                (
                    FeatureValue::Categorical(level),
                    Term::Categorical { weights },
                    FeatureKind::Categorical(levels),
                ) => {
                    let idx = levels.iter().position(|l| l == level).ok_or_else(|| {
                        InferenceError::InferenceFailed(format!(
                            "unknown level '{}' for '{}'",
                            level, spec.name
                        ))
                    })?;
                    weights[idx]
                }
                _ => {
                    return Err(InferenceError::InferenceFailed(format!(
                        "value kind does not match term for '{}'",
                        spec.name
                    )))
                }
            };
        }
        Ok(total)
    }
}

impl RiskModel for LinearModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, _mode: ScoringMode) -> bool {
        true
    }

    fn predict_proba(&self, record: &FeatureRecord) -> Result<f64, InferenceError> {
        self.score(record).map(logistic)
    }

    fn decision_function(&self, record: &FeatureRecord) -> Result<f64, InferenceError> {
        self.score(record)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use feature_engine::{FeatureAssembler, Gender, PatientInputs, FEATURE_NAMES};
    use serde_json::{json, Value};

    /// Artifact with zero weights except the ones given
    pub(crate) fn artifact(intercept: f64, numeric: &[(&str, f64)]) -> Value {
        let features: Vec<Value> = FEATURE_SCHEMA
            .iter()
            .map(|spec| match spec.kind {
                FeatureKind::Numeric => {
                    let weight = numeric
                        .iter()
                        .find(|(name, _)| *name == spec.name)
                        .map(|(_, w)| *w)
                        .unwrap_or(0.0);
                    json!({ "name": spec.name, "weight": weight })
                }
                FeatureKind::Categorical(levels) => {
                    let levels: BTreeMap<&str, f64> = levels.iter().map(|l| (*l, 0.0)).collect();
                    json!({ "name": spec.name, "levels": levels })
                }
            })
            .collect();
        json!({ "name": "test-logit", "intercept": intercept, "features": features })
    }

    fn record(inputs: PatientInputs) -> FeatureRecord {
        FeatureAssembler::new().assemble(&inputs)
    }

    #[test]
    fn test_intercept_only() {
        let model = LinearModel::from_json(&artifact(0.0, &[]).to_string()).unwrap();
        let r = record(PatientInputs::default());
        assert_eq!(model.decision_function(&r).unwrap(), 0.0);
        assert_eq!(model.predict_proba(&r).unwrap(), 0.5);
    }

    #[test]
    fn test_numeric_weight_and_center() {
        let mut doc = artifact(-1.0, &[("HbA1cLevel (%)", 2.0)]);
        doc["features"][5]["center"] = json!(5.5);
        let model = LinearModel::from_json(&doc.to_string()).unwrap();
        // -1 + 2 * (6.5 - 5.5)
        let raw = model.decision_function(&record(PatientInputs::default())).unwrap();
        assert!((raw - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_categorical_levels() {
        let mut doc = artifact(0.0, &[]);
        doc["features"][1]["levels"]["Female"] = json!(0.75);
        let model = LinearModel::from_json(&doc.to_string()).unwrap();
        let female = record(PatientInputs {
            gender: Gender::Female,
            ..Default::default()
        });
        assert!((model.decision_function(&female).unwrap() - 0.75).abs() < 1e-12);
        let male = record(PatientInputs::default());
        assert_eq!(model.decision_function(&male).unwrap(), 0.0);
    }

    #[test]
    fn test_rejects_reordered_features() {
        let mut doc = artifact(0.0, &[]);
        let features = doc["features"].as_array_mut().unwrap();
        features.swap(0, 2);
        let err = LinearModel::from_json(&doc.to_string()).unwrap_err();
        assert!(err.to_string().contains("position 0 is 'BMI (kg/m2)'"));
    }

    #[test]
    fn test_rejects_missing_feature() {
        let mut doc = artifact(0.0, &[]);
        doc["features"].as_array_mut().unwrap().pop();
        let err = LinearModel::from_json(&doc.to_string()).unwrap_err();
        assert!(err.to_string().contains("expected 21 features"));
    }

    #[test]
    fn test_rejects_missing_level() {
        let mut doc = artifact(0.0, &[]);
        doc["features"][12]["levels"]
            .as_object_mut()
            .unwrap()
            .remove("Current");
        let err = LinearModel::from_json(&doc.to_string()).unwrap_err();
        assert!(err.to_string().contains("level 'Current'"));
    }

    #[test]
    fn test_rejects_unknown_level() {
        let mut doc = artifact(0.0, &[]);
        doc["features"][13]["levels"]["Extreme"] = json!(1.0);
        let err = LinearModel::from_json(&doc.to_string()).unwrap_err();
        assert!(err.to_string().contains("unknown level 'Extreme'"));
    }

    #[test]
    fn test_rejects_weight_on_categorical() {
        let mut doc = artifact(0.0, &[]);
        doc["features"][1] = json!({ "name": "Gender", "weight": 1.0 });
        assert!(LinearModel::from_json(&doc.to_string()).is_err());
    }

    #[test]
    fn test_rejects_zero_scale() {
        let mut doc = artifact(0.0, &[]);
        doc["features"][0]["scale"] = json!(0.0);
        assert!(LinearModel::from_json(&doc.to_string()).is_err());
    }

    #[test]
    fn test_shipped_artifact_matches_schema() {
        let text = include_str!("../../../models/diabetes_logit_v1.json");
        let model = LinearModel::from_json(text).unwrap();
        assert_eq!(model.name(), "diabetes-logit-v1");
        let doc: Value = serde_json::from_str(text).unwrap();
        let names: Vec<&str> = doc["features"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, FEATURE_NAMES.to_vec());
    }
}
