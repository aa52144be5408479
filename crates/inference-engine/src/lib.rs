//! Diabetes Risk Inference Engine
//!
//! Loads a pre-trained classifier artifact once and scores feature records
//! into a probability and a risk label.

mod engine;
mod linear;
mod model;
mod onnx;
mod scorer;

pub use engine::{EngineConfig, InferenceEngine, RiskReport};
pub use linear::LinearModel;
pub use model::{ArtifactOptions, ModelArtifact, RiskModel};
pub use onnx::OnnxModel;
pub use scorer::{RiskAssessment, RiskScorer, ScorerConfig};

use risk_bands::ScoringMode;
use thiserror::Error;

/// Errors during model loading and inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model load failed: {0}")]
    ModelLoadError(String),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: String, actual: String },
    #[error("Model '{model}' has no entry point for {mode} scoring")]
    UnsupportedMode { model: String, mode: ScoringMode },
}
