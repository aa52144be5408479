//! Risk Bands
//!
//! Converts model output into a probability and buckets it into the
//! Low / Moderate / High risk label shown to the user.

mod mode;
mod thresholds;

pub use mode::{logistic, ScoringMode};
pub use thresholds::{GaugeBand, RiskLabel, RiskThresholds, ThresholdPreset};

use thiserror::Error;

/// Errors in risk band configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BandError {
    #[error("Cut points must be finite and within [0, 100], got low={low}, high={high}")]
    OutOfRange { low: f64, high: f64 },
    #[error("Low cut {low} must be below high cut {high}")]
    Inverted { low: f64, high: f64 },
    #[error("Unknown {kind} '{value}'")]
    Unknown { kind: &'static str, value: String },
}
