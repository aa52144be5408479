//! Inference Engine
//!
//! Load-once service object: owns the model for the process lifetime and is
//! handed by reference to whatever submits assessments.

use crate::model::{ArtifactOptions, ModelArtifact, RiskModel};
use crate::scorer::{RiskAssessment, RiskScorer, ScorerConfig};
use crate::InferenceError;
use feature_engine::{FeatureAssembler, FeatureRecord, PatientInputs};
use risk_bands::GaugeBand;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

/// Engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Model artifact path
    pub model_path: PathBuf,
    /// Tensor output layout
    pub artifact: ArtifactOptions,
    /// Scoring policy
    pub scorer: ScorerConfig,
}

/// Full result of one submission
#[derive(Debug, Clone, Serialize)]
pub struct RiskReport {
    pub assessment: RiskAssessment,
    pub bands: [GaugeBand; 3],
    pub record: FeatureRecord,
}

/// Diabetes risk inference engine
pub struct InferenceEngine {
    assembler: FeatureAssembler,
    scorer: RiskScorer,
    model_path: Option<PathBuf>,
}

impl InferenceEngine {
    /// Load the model artifact and build the scorer
    pub fn load(config: &EngineConfig) -> Result<Self, InferenceError> {
        info!("Creating inference engine with model: {}", config.model_path.display());
        let model = ModelArtifact::load(&config.model_path, &config.artifact)?;
        let mut engine = Self::with_model(model, config.scorer)?;
        engine.model_path = Some(config.model_path.clone());
        Ok(engine)
    }

    /// Build an engine around an already loaded model
    pub fn with_model(model: Box<dyn RiskModel>, scorer: ScorerConfig) -> Result<Self, InferenceError> {
        Ok(Self {
            assembler: FeatureAssembler::new(),
            scorer: RiskScorer::new(model, scorer)?,
            model_path: None,
        })
    }

    /// Assemble a record from form inputs and score it
    pub fn assess(&self, inputs: &PatientInputs) -> Result<RiskReport, InferenceError> {
        let record = self.assembler.assemble(inputs);
        let assessment = self.score(&record)?;
        Ok(RiskReport {
            bands: self.scorer.config().thresholds.bands(),
            assessment,
            record,
        })
    }

    /// Score an assembled record
    pub fn score(&self, record: &FeatureRecord) -> Result<RiskAssessment, InferenceError> {
        let assessment = self.scorer.score(record)?;
        debug!(
            "Assessment: {:.2}% {} via {}",
            assessment.percent, assessment.label, assessment.mode
        );
        Ok(assessment)
    }

    /// Get model name
    pub fn model_name(&self) -> &str {
        self.scorer.model().name()
    }

    /// Get model path, if loaded from disk
    pub fn model_path(&self) -> Option<&PathBuf> {
        self.model_path.as_ref()
    }

    /// Active scoring policy
    pub fn scorer_config(&self) -> &ScorerConfig {
        self.scorer.config()
    }
}
