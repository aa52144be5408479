//! Report Rendering

use crate::args::OutputFormat;
use feature_engine::{FeatureKind, FEATURE_COUNT, FEATURE_SCHEMA};
use inference_engine::{InferenceEngine, RiskReport};
use risk_bands::{GaugeBand, RiskLabel};
use std::fmt::{self, Write};

/// Gauge width in characters; each cell covers 2 percentage points
const GAUGE_WIDTH: usize = 50;

pub const DISCLAIMER: &str = "Medical Disclaimer: This tool is for educational purposes only and does not replace professional medical advice.";

/// Render an assessment in the requested format
pub fn render(report: &RiskReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)?),
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(report)?;
            out.push('\n');
            Ok(out)
        }
    }
}

/// Human-readable report
pub fn render_text(report: &RiskReport) -> Result<String, fmt::Error> {
    let assessment = &report.assessment;
    let mut out = String::new();

    writeln!(out, "Prediction Result")?;
    writeln!(out, "=================")?;
    writeln!(out, "{}", assessment.label.headline())?;
    writeln!(out, "Diabetes Probability: {:.2}%", assessment.percent)?;
    if let Some(raw) = assessment.raw_score {
        writeln!(out, "Raw score: {:.4}", raw)?;
    }
    writeln!(out)?;
    writeln!(out, "Risk Level")?;
    out.push_str(&gauge(&report.bands, assessment.percent));
    writeln!(out)?;
    writeln!(
        out,
        "Model: {} ({} scoring)",
        assessment.model_name, assessment.mode
    )?;
    writeln!(out, "{}", DISCLAIMER)?;
    Ok(out)
}

fn band_glyph(label: RiskLabel) -> char {
    match label {
        RiskLabel::Low => '-',
        RiskLabel::Moderate => '=',
        RiskLabel::High => '#',
    }
}

/// Two-line text gauge: the colored steps, then a marker under the value
pub fn gauge(bands: &[GaugeBand; 3], percent: f64) -> String {
    let step = 100.0 / GAUGE_WIDTH as f64;
    let cells: String = (0..GAUGE_WIDTH)
        .map(|i| {
            let midpoint = (i as f64 + 0.5) * step;
            let label = bands
                .iter()
                .find(|b| midpoint >= b.from && midpoint < b.to)
                .map(|b| b.label)
                .unwrap_or(RiskLabel::High);
            band_glyph(label)
        })
        .collect();

    let position = ((percent / step) as usize).min(GAUGE_WIDTH - 1);
    format!(
        "0% [{}] 100%\n    {}^ {:.2}%\n",
        cells,
        " ".repeat(position),
        percent
    )
}

/// Model and input summary for `info`
pub fn render_info(engine: &InferenceEngine) -> Result<String, fmt::Error> {
    let config = engine.scorer_config();
    let mut out = String::new();

    writeln!(out, "Model:      {}", engine.model_name())?;
    if let Some(path) = engine.model_path() {
        writeln!(out, "Artifact:   {}", path.display())?;
    }
    writeln!(out, "Scoring:    {}", config.mode)?;
    writeln!(
        out,
        "Cut points: low < {} <= moderate < {} <= high",
        config.thresholds.low_cut(),
        config.thresholds.high_cut()
    )?;
    writeln!(out, "Features:   {} clinical attributes", FEATURE_COUNT)?;
    writeln!(out)?;

    for spec in FEATURE_SCHEMA.iter() {
        match spec.kind {
            FeatureKind::Categorical(levels) => {
                writeln!(out, "  {:<34} {}", spec.name, levels.join(" | "))?;
            }
            FeatureKind::Numeric => match data_validator::domain::by_name(spec.name) {
                Some(domain) if domain.is_bounded() => {
                    writeln!(
                        out,
                        "  {:<34} {} to {} (default {})",
                        spec.name, domain.min, domain.max, domain.default
                    )?;
                }
                Some(domain) => {
                    writeln!(out, "  {:<34} any (default {})", spec.name, domain.default)?;
                }
                None => {
                    writeln!(out, "  {:<34} 0 | 1 (default 0)", spec.name)?;
                }
            },
        }
    }
    Ok(out)
}
