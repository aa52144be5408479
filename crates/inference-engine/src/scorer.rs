//! Risk Scorer

use crate::model::RiskModel;
use crate::InferenceError;
use chrono::{DateTime, Utc};
use feature_engine::FeatureRecord;
use risk_bands::{logistic, RiskLabel, RiskThresholds, ScoringMode};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};

/// Scoring policy
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScorerConfig {
    /// Which model entry point to use
    pub mode: ScoringMode,
    /// Percent cut points for the label
    pub thresholds: RiskThresholds,
}

/// Outcome of scoring one feature record
#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessment {
    /// Positive-class probability in [0, 1]
    pub probability: f64,
    /// Probability in percent
    pub percent: f64,
    /// Risk label from the cut points
    pub label: RiskLabel,
    /// Scoring mode used
    pub mode: ScoringMode,
    /// Raw decision score, logistic mode only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_score: Option<f64>,
    /// Name of the model that produced the score
    pub model_name: String,
    /// When the assessment was made
    pub assessed_at: DateTime<Utc>,
    /// Inference latency in microseconds
    pub latency_us: u64,
}

/// Scores feature records with a loaded model
pub struct RiskScorer {
    model: Box<dyn RiskModel>,
    config: ScorerConfig,
}

impl RiskScorer {
    /// Create a scorer, failing if the model lacks the entry point the mode needs
    pub fn new(model: Box<dyn RiskModel>, config: ScorerConfig) -> Result<Self, InferenceError> {
        if !model.supports(config.mode) {
            return Err(InferenceError::UnsupportedMode {
                model: model.name().to_string(),
                mode: config.mode,
            });
        }

        info!(
            "Risk scorer ready: model={}, mode={}, cuts={}/{}",
            model.name(),
            config.mode,
            config.thresholds.low_cut(),
            config.thresholds.high_cut()
        );
        Ok(Self { model, config })
    }

    /// Score one record
    pub fn score(&self, record: &FeatureRecord) -> Result<RiskAssessment, InferenceError> {
        let start = Instant::now();

        let (probability, raw_score) = match self.config.mode {
            ScoringMode::Direct => (self.model.predict_proba(record)?, None),
            ScoringMode::Logistic => {
                let raw = self.model.decision_function(record)?;
                if !raw.is_finite() {
                    return Err(InferenceError::InferenceFailed(format!(
                        "model returned non-finite raw score {}",
                        raw
                    )));
                }
                (logistic(raw), Some(raw))
            }
        };

        if !(0.0..=1.0).contains(&probability) {
            return Err(InferenceError::InferenceFailed(format!(
                "model returned probability {} outside [0, 1]",
                probability
            )));
        }

        let percent = probability * 100.0;
        let label = self.config.thresholds.classify(percent);
        let latency_us = start.elapsed().as_micros() as u64;

        debug!(
            "Scored record: {:.2}% -> {} (raw={:?}, latency={}us)",
            percent, label, raw_score, latency_us
        );

        Ok(RiskAssessment {
            probability,
            percent,
            label,
            mode: self.config.mode,
            raw_score,
            model_name: self.model.name().to_string(),
            assessed_at: Utc::now(),
            latency_us,
        })
    }

    /// The loaded model
    pub fn model(&self) -> &dyn RiskModel {
        self.model.as_ref()
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }
}
