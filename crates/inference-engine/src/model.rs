//! Model Artifacts

use crate::linear::LinearModel;
use crate::onnx::OnnxModel;
use crate::InferenceError;
use feature_engine::FeatureRecord;
use risk_bands::ScoringMode;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// A pre-trained binary classifier over the 21-field feature record.
///
/// Implementations expose a probability entry point, a raw decision score
/// entry point, or both; `supports` tells which.
pub trait RiskModel: Send + Sync {
    /// Human-readable model name
    fn name(&self) -> &str;

    /// Whether the entry point needed by `mode` exists
    fn supports(&self, mode: ScoringMode) -> bool;

    /// Positive-class probability in [0, 1]
    fn predict_proba(&self, record: &FeatureRecord) -> Result<f64, InferenceError>;

    /// Raw decision score (log-odds) before any probability transform
    fn decision_function(&self, record: &FeatureRecord) -> Result<f64, InferenceError>;
}

/// Options for tensor-runtime artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactOptions {
    /// Output index holding class probabilities
    pub probability_output: Option<usize>,
    /// Output index holding the raw decision score
    pub score_output: Option<usize>,
}

impl Default for ArtifactOptions {
    fn default() -> Self {
        // sklearn and CatBoost exports emit [label, probabilities]
        Self {
            probability_output: Some(1),
            score_output: None,
        }
    }
}

/// Loader that picks a model implementation from the artifact's extension
pub struct ModelArtifact;

impl ModelArtifact {
    /// Load a model artifact.
    ///
    /// `.json` is a linear model, `.onnx` runs through tract. Anything else is
    /// rejected.
    pub fn load(path: &Path, options: &ArtifactOptions) -> Result<Box<dyn RiskModel>, InferenceError> {
        info!("Loading model artifact: {}", path.display());

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let model: Box<dyn RiskModel> = match extension.as_str() {
            "json" => Box::new(LinearModel::load(path)?),
            "onnx" => Box::new(OnnxModel::load(path, options)?),
            other => {
                return Err(InferenceError::ModelLoadError(format!(
                    "{}: unsupported artifact format '.{}' (expected .json or .onnx)",
                    path.display(),
                    other
                )))
            }
        };

        info!(
            "Model '{}' loaded (direct={}, logistic={})",
            model.name(),
            model.supports(ScoringMode::Direct),
            model.supports(ScoringMode::Logistic)
        );
        Ok(model)
    }
}
