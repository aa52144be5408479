//! Scoring Modes

use crate::BandError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a model output becomes a probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Positive-class probability from the model's probability entry point
    #[default]
    Direct,
    /// Raw decision score passed through the logistic function
    Logistic,
}

impl ScoringMode {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringMode::Direct => "direct",
            ScoringMode::Logistic => "logistic",
        }
    }
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoringMode {
    type Err = BandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" | "proba" | "probability" => Ok(ScoringMode::Direct),
            "logistic" | "raw" | "decision" => Ok(ScoringMode::Logistic),
            _ => Err(BandError::Unknown {
                kind: "scoring mode",
                value: s.to_string(),
            }),
        }
    }
}

/// Logistic function `1 / (1 + e^-x)`.
///
/// Evaluated so that neither branch exponentiates a large positive number.
pub fn logistic(raw: f64) -> f64 {
    if raw >= 0.0 {
        1.0 / (1.0 + (-raw).exp())
    } else {
        let e = raw.exp();
        e / (1.0 + e)
    }
}
