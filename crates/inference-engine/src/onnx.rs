//! ONNX model artifact via tract.
//!
//! The graph takes a `[1, 21]` f32 tensor; categorical columns carry their
//! ordinal level index.

use crate::model::{ArtifactOptions, RiskModel};
use crate::InferenceError;
use feature_engine::{FeatureRecord, FEATURE_COUNT};
use risk_bands::ScoringMode;
use std::path::Path;
use tract_onnx::prelude::*;
use tracing::{debug, info};

/// ONNX classifier
pub struct OnnxModel {
    name: String,
    plan: TypedRunnableModel<TypedModel>,
    probability_output: Option<usize>,
    score_output: Option<usize>,
}

impl OnnxModel {
    /// Load and optimize the graph
    pub fn load(path: &Path, options: &ArtifactOptions) -> Result<Self, InferenceError> {
        let load_error = |e: TractError| {
            InferenceError::ModelLoadError(format!("{}: {}", path.display(), e))
        };

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .map_err(load_error)?
            .with_input_fact(0, f32::fact([1, FEATURE_COUNT]).into())
            .map_err(load_error)?
            .into_optimized()
            .map_err(load_error)?
            .into_runnable()
            .map_err(load_error)?;

        let output_count = plan.model().outputs.len();
        for index in [options.probability_output, options.score_output].into_iter().flatten() {
            if index >= output_count {
                return Err(InferenceError::ModelLoadError(format!(
                    "{}: output index {} out of range, graph has {} outputs",
                    path.display(),
                    index,
                    output_count
                )));
            }
        }

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("onnx-model")
            .to_string();

        info!("ONNX model '{}' ready with {} outputs", name, output_count);

        Ok(Self {
            name,
            plan,
            probability_output: options.probability_output,
            score_output: options.score_output,
        })
    }

    fn run(&self, record: &FeatureRecord) -> Result<TVec<TValue>, InferenceError> {
        let values = record.to_ordinal_vec();
        let actual = values.len();
        let input: Tensor = tract_ndarray::Array2::from_shape_vec((1, FEATURE_COUNT), values)
            .map_err(|_| InferenceError::InvalidInputShape {
                expected: format!("[1, {}]", FEATURE_COUNT),
                actual: format!("[{}]", actual),
            })?
            .into();

        self.plan
            .run(tvec!(input.into()))
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))
    }

    /// Positive-class value: the last element of the first row
    fn positive_class(outputs: &TVec<TValue>, index: usize) -> Result<f64, InferenceError> {
        let tensor = outputs
            .get(index)
            .ok_or_else(|| InferenceError::InferenceFailed(format!("missing output {}", index)))?;
        let values = tensor
            .cast_to::<f32>()
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;
        let slice = values
            .as_slice::<f32>()
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;

        let row_len = tensor.shape().last().copied().unwrap_or(slice.len()).max(1);
        slice
            .get(row_len.min(slice.len()).saturating_sub(1))
            .map(|v| f64::from(*v))
            .ok_or_else(|| InferenceError::InferenceFailed(format!("output {} is empty", index)))
    }
}

impl RiskModel for OnnxModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, mode: ScoringMode) -> bool {
        match mode {
            ScoringMode::Direct => self.probability_output.is_some(),
            ScoringMode::Logistic => self.score_output.is_some(),
        }
    }

    fn predict_proba(&self, record: &FeatureRecord) -> Result<f64, InferenceError> {
        let index = self.probability_output.ok_or_else(|| InferenceError::UnsupportedMode {
            model: self.name.clone(),
            mode: ScoringMode::Direct,
        })?;
        let outputs = self.run(record)?;
        let probability = Self::positive_class(&outputs, index)?;
        debug!("ONNX probability output: {}", probability);
        Ok(probability)
    }

    fn decision_function(&self, record: &FeatureRecord) -> Result<f64, InferenceError> {
        let index = self.score_output.ok_or_else(|| InferenceError::UnsupportedMode {
            model: self.name.clone(),
            mode: ScoringMode::Logistic,
        })?;
        let outputs = self.run(record)?;
        let raw = Self::positive_class(&outputs, index)?;
        debug!("ONNX raw score output: {}", raw);
        Ok(raw)
    }
}
