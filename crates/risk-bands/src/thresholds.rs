//! Risk Thresholds and Labels

use crate::BandError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Discrete risk label shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLabel {
    Low,
    Moderate,
    High,
}

impl RiskLabel {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::Low => "low",
            RiskLabel::Moderate => "moderate",
            RiskLabel::High => "high",
        }
    }

    /// Result line for reports
    pub fn headline(&self) -> &'static str {
        match self {
            RiskLabel::Low => "LOW RISK of Diabetes",
            RiskLabel::Moderate => "MODERATE RISK of Diabetes",
            RiskLabel::High => "HIGH RISK of Diabetes",
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named cut point pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdPreset {
    /// 30 / 70
    #[default]
    Standard,
    /// 35 / 65
    Narrow,
    /// 40 / 70
    Conservative,
}

impl FromStr for ThresholdPreset {
    type Err = BandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(ThresholdPreset::Standard),
            "narrow" => Ok(ThresholdPreset::Narrow),
            "conservative" => Ok(ThresholdPreset::Conservative),
            _ => Err(BandError::Unknown {
                kind: "threshold preset",
                value: s.to_string(),
            }),
        }
    }
}

/// One colored step of the risk gauge
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GaugeBand {
    pub label: RiskLabel,
    /// Lower edge in percent (inclusive)
    pub from: f64,
    /// Upper edge in percent
    pub to: f64,
}

/// Percent cut points separating Low / Moderate / High.
///
/// `percent < low_cut` is Low, `percent >= high_cut` is High, everything in
/// between is Moderate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskThresholds {
    low_cut: f64,
    high_cut: f64,
}

impl RiskThresholds {
    /// Create thresholds, rejecting cut points outside `0 <= low < high <= 100`
    pub fn new(low_cut: f64, high_cut: f64) -> Result<Self, BandError> {
        let in_range = |v: f64| v.is_finite() && (0.0..=100.0).contains(&v);
        if !in_range(low_cut) || !in_range(high_cut) {
            return Err(BandError::OutOfRange {
                low: low_cut,
                high: high_cut,
            });
        }
        if low_cut >= high_cut {
            return Err(BandError::Inverted {
                low: low_cut,
                high: high_cut,
            });
        }
        Ok(Self { low_cut, high_cut })
    }

    /// Cut points of a named preset
    pub fn preset(preset: ThresholdPreset) -> Self {
        match preset {
            ThresholdPreset::Standard => Self::standard(),
            ThresholdPreset::Narrow => Self::narrow(),
            ThresholdPreset::Conservative => Self::conservative(),
        }
    }

    /// 30 / 70
    pub fn standard() -> Self {
        Self {
            low_cut: 30.0,
            high_cut: 70.0,
        }
    }

    /// 35 / 65
    pub fn narrow() -> Self {
        Self {
            low_cut: 35.0,
            high_cut: 65.0,
        }
    }

    /// 40 / 70
    pub fn conservative() -> Self {
        Self {
            low_cut: 40.0,
            high_cut: 70.0,
        }
    }

    pub fn low_cut(&self) -> f64 {
        self.low_cut
    }

    pub fn high_cut(&self) -> f64 {
        self.high_cut
    }

    /// Classify a probability given in percent
    pub fn classify(&self, percent: f64) -> RiskLabel {
        let label = if percent < self.low_cut {
            RiskLabel::Low
        } else if percent < self.high_cut {
            RiskLabel::Moderate
        } else {
            RiskLabel::High
        };
        debug!(
            "Classified {:.2}% as {} (cuts {}/{})",
            percent, label, self.low_cut, self.high_cut
        );
        label
    }

    /// The three gauge steps covering 0..100
    pub fn bands(&self) -> [GaugeBand; 3] {
        [
            GaugeBand {
                label: RiskLabel::Low,
                from: 0.0,
                to: self.low_cut,
            },
            GaugeBand {
                label: RiskLabel::Moderate,
                from: self.low_cut,
                to: self.high_cut,
            },
            GaugeBand {
                label: RiskLabel::High,
                from: self.high_cut,
                to: 100.0,
            },
        ]
    }
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logistic;

    #[test]
    fn test_standard_boundaries() {
        let t = RiskThresholds::standard();
        assert_eq!(t.classify(29.99), RiskLabel::Low);
        assert_eq!(t.classify(30.0), RiskLabel::Moderate);
        assert_eq!(t.classify(69.99), RiskLabel::Moderate);
        assert_eq!(t.classify(70.0), RiskLabel::High);
        assert_eq!(t.classify(0.0), RiskLabel::Low);
        assert_eq!(t.classify(100.0), RiskLabel::High);
    }

    #[test]
    fn test_narrow_boundaries() {
        let t = RiskThresholds::narrow();
        assert_eq!(t.classify(34.9), RiskLabel::Low);
        assert_eq!(t.classify(35.0), RiskLabel::Moderate);
        assert_eq!(t.classify(65.0), RiskLabel::High);
    }

    #[test]
    fn test_conservative_boundaries() {
        let t = RiskThresholds::preset(ThresholdPreset::Conservative);
        assert_eq!(t.classify(39.0), RiskLabel::Low);
        assert_eq!(t.classify(40.0), RiskLabel::Moderate);
        assert_eq!(t.classify(70.0), RiskLabel::High);
    }

    #[test]
    fn test_raw_score_two_is_high() {
        let percent = logistic(2.0) * 100.0;
        assert_eq!(RiskThresholds::standard().classify(percent), RiskLabel::High);
        assert_eq!(RiskThresholds::narrow().classify(percent), RiskLabel::High);
    }

    #[test]
    fn test_rejects_invalid_cuts() {
        assert_eq!(
            RiskThresholds::new(70.0, 30.0),
            Err(BandError::Inverted {
                low: 70.0,
                high: 30.0
            })
        );
        assert!(RiskThresholds::new(50.0, 50.0).is_err());
        assert!(RiskThresholds::new(-1.0, 50.0).is_err());
        assert!(RiskThresholds::new(10.0, 101.0).is_err());
        assert!(RiskThresholds::new(f64::NAN, 50.0).is_err());
        assert_eq!(RiskThresholds::new(30.0, 70.0), Ok(RiskThresholds::standard()));
    }

    #[test]
    fn test_bands_cover_gauge() {
        let bands = RiskThresholds::narrow().bands();
        assert_eq!(bands[0].from, 0.0);
        assert_eq!(bands[0].to, 35.0);
        assert_eq!(bands[1].label, RiskLabel::Moderate);
        assert_eq!(bands[2].from, 65.0);
        assert_eq!(bands[2].to, 100.0);
    }

    #[test]
    fn test_preset_parse() {
        assert_eq!("Narrow".parse::<ThresholdPreset>().unwrap(), ThresholdPreset::Narrow);
        assert!("strict".parse::<ThresholdPreset>().is_err());
    }

    #[test]
    fn test_label_text() {
        assert_eq!(RiskLabel::Moderate.headline(), "MODERATE RISK of Diabetes");
        assert_eq!(RiskLabel::High.to_string(), "high");
    }
}
