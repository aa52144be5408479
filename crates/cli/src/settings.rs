//! Layered Settings
//!
//! Defaults, then an optional TOML file, then `DRISK_*` environment
//! variables (`__` separates sections), then command-line flags.

use config::{Config, ConfigError, Environment, File};
use inference_engine::{ArtifactOptions, EngineConfig, ScorerConfig};
use risk_bands::{BandError, RiskThresholds, ScoringMode, ThresholdPreset};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_NAME: &str = "diabetes-risk";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "DRISK";

/// Application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub model: ModelSettings,
    pub scoring: ScoringSettings,
    pub logging: LoggingSettings,
}

/// Model artifact settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Artifact path (`.json` linear model or `.onnx`)
    pub path: PathBuf,
    /// ONNX output index holding class probabilities
    pub probability_output: Option<usize>,
    /// ONNX output index holding the raw decision score
    pub score_output: Option<usize>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        let artifact = ArtifactOptions::default();
        Self {
            path: PathBuf::from("models/diabetes_logit_v1.json"),
            probability_output: artifact.probability_output,
            score_output: artifact.score_output,
        }
    }
}

/// Scoring policy settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSettings {
    pub mode: ScoringMode,
    pub preset: ThresholdPreset,
    /// Overrides the preset's low cut
    pub low_cut: Option<f64>,
    /// Overrides the preset's high cut
    pub high_cut: Option<f64>,
}

impl ScoringSettings {
    /// Resolve the cut points: explicit cuts win over the preset
    pub fn thresholds(&self) -> Result<RiskThresholds, BandError> {
        let preset = RiskThresholds::preset(self.preset);
        match (self.low_cut, self.high_cut) {
            (None, None) => Ok(preset),
            (low, high) => RiskThresholds::new(
                low.unwrap_or(preset.low_cut()),
                high.unwrap_or(preset.high_cut()),
            ),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Settings {
    /// Load settings. An explicit file must exist; the default one may not.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Engine configuration for these settings
    pub fn engine_config(&self) -> Result<EngineConfig, BandError> {
        Ok(EngineConfig {
            model_path: self.model.path.clone(),
            artifact: ArtifactOptions {
                probability_output: self.model.probability_output,
                score_output: self.model.score_output,
            },
            scorer: ScorerConfig {
                mode: self.scoring.mode,
                thresholds: self.scoring.thresholds()?,
            },
        })
    }
}
