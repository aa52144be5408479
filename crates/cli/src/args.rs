//! Command-Line Arguments

use crate::settings::ScoringSettings;
use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use feature_engine::{ActivityLevel, AlcoholConsumption, Gender, PatientInputs, SmokingHistory};
use risk_bands::{ScoringMode, ThresholdPreset};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "diabetes-risk",
    author,
    version,
    about = "Estimate diabetes risk from clinical and lifestyle attributes",
    long_about = None,
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Model artifact (.json or .onnx), overrides model.path
    #[arg(short, long, global = true)]
    pub model: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub assess: AssessArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score one patient (default)
    Assess(AssessArgs),
    /// Show the loaded model, scoring policy and input domains
    Info,
}

impl Cli {
    /// Subcommand to run; bare invocation means `assess`
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Assess(self.assess))
    }
}

/// Report format
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct AssessArgs {
    /// Read patient inputs from a JSON file instead of the flags below
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Scoring mode: direct probability or raw score + logistic
    #[arg(long)]
    pub mode: Option<ScoringMode>,

    /// Named cut points: standard (30/70), narrow (35/65), conservative (40/70)
    #[arg(long)]
    pub preset: Option<ThresholdPreset>,

    /// Low/Moderate cut point in percent
    #[arg(long)]
    pub low_cut: Option<f64>,

    /// Moderate/High cut point in percent
    #[arg(long)]
    pub high_cut: Option<f64>,

    #[command(flatten)]
    pub patient: PatientArgs,
}

impl AssessArgs {
    /// Apply scoring flags on top of the loaded settings
    pub fn apply_overrides(&self, scoring: &mut ScoringSettings) {
        if let Some(mode) = self.mode {
            scoring.mode = mode;
        }
        if let Some(preset) = self.preset {
            scoring.preset = preset;
        }
        if self.low_cut.is_some() {
            scoring.low_cut = self.low_cut;
        }
        if self.high_cut.is_some() {
            scoring.high_cut = self.high_cut;
        }
    }

    /// Patient inputs from `--input` or the flags
    pub fn patient_inputs(&self) -> anyhow::Result<PatientInputs> {
        match &self.input {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading patient file {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing patient file {}", path.display()))
            }
            None => Ok(self.patient.to_inputs()),
        }
    }
}

/// Patient form fields. Defaults match the form's initial values.
#[derive(Args, Debug, Clone)]
pub struct PatientArgs {
    /// Age (years), 18-100
    #[arg(long, default_value_t = 30.0)]
    pub age: f64,

    /// Gender: Male, Female, Transgender
    #[arg(long, default_value_t = Gender::Male)]
    pub gender: Gender,

    /// Pregnancies, 0-20 (ignored unless gender is Female)
    #[arg(long, default_value_t = 0.0)]
    pub pregnancies: f64,

    /// Blood glucose (mg/dL), 50-400
    #[arg(long, default_value_t = 120.0)]
    pub glucose: f64,

    /// Blood pressure (mmHg), 50-200
    #[arg(long, default_value_t = 80.0)]
    pub blood_pressure: f64,

    /// Skin thickness (mm), 0-100
    #[arg(long, default_value_t = 20.0)]
    pub skin_thickness: f64,

    /// Insulin (µU/mL), 0-900
    #[arg(long, default_value_t = 80.0)]
    pub insulin: f64,

    /// BMI (kg/m2), 10-70
    #[arg(long, default_value_t = 25.0)]
    pub bmi: f64,

    /// HbA1c (%), 3-15
    #[arg(long, default_value_t = 6.5)]
    pub hba1c: f64,

    /// Triglycerides (mg/dL), 50-500
    #[arg(long, default_value_t = 150.0)]
    pub triglycerides: f64,

    /// Resting heart rate (bpm), 40-150
    #[arg(long, default_value_t = 75.0)]
    pub heart_rate: f64,

    /// Waist-hip ratio, 0.5-2.0
    #[arg(long, default_value_t = 0.9)]
    pub waist_hip: f64,

    /// Smoking history: Never, Former, Current
    #[arg(long, default_value_t = SmokingHistory::Never)]
    pub smoking: SmokingHistory,

    /// Alcohol consumption: None, Low, Moderate, High
    #[arg(long, default_value_t = AlcoholConsumption::None)]
    pub alcohol: AlcoholConsumption,

    /// Physical activity: Low, Moderate, High
    #[arg(long, default_value_t = ActivityLevel::Low)]
    pub activity: ActivityLevel,

    /// Hypertension (0/1)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub hypertension: u8,

    /// Heart disease (0/1)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub heart_disease: u8,

    /// Family history (0/1)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub family_history: u8,

    /// Metabolic score (count 0-4)
    #[arg(long, default_value_t = 2.0)]
    pub metabolic: f64,

    /// Obesity risk index (kg/m2 * years)
    #[arg(long, default_value_t = 1200.0)]
    pub obesity_risk: f64,

    /// Chronic sugar load (mg/dL * %)
    #[arg(long, default_value_t = 1000.0)]
    pub sugar_load: f64,
}

impl PatientArgs {
    pub fn to_inputs(&self) -> PatientInputs {
        PatientInputs {
            age: self.age,
            gender: self.gender,
            pregnancies: self.pregnancies,
            glucose: self.glucose,
            blood_pressure: self.blood_pressure,
            skin_thickness: self.skin_thickness,
            insulin: self.insulin,
            bmi: self.bmi,
            hba1c: self.hba1c,
            triglycerides: self.triglycerides,
            resting_heart_rate: self.heart_rate,
            waist_to_hip_ratio: self.waist_hip,
            smoking: self.smoking,
            alcohol: self.alcohol,
            activity: self.activity,
            hypertension: self.hypertension == 1,
            heart_disease: self.heart_disease == 1,
            family_history: self.family_history == 1,
            metabolic_score: self.metabolic,
            obesity_risk: self.obesity_risk,
            chronic_sugar_load: self.sugar_load,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flag_defaults_match_form_defaults() {
        let cli = Cli::try_parse_from(["diabetes-risk"]).unwrap();
        match cli.into_command() {
            Command::Assess(args) => {
                assert_eq!(args.patient.to_inputs(), PatientInputs::default());
                assert_eq!(args.format, OutputFormat::Text);
            }
            Command::Info => panic!("expected assess"),
        }
    }

    #[test]
    fn test_parse_patient_flags() {
        let cli = Cli::try_parse_from([
            "diabetes-risk",
            "assess",
            "--age",
            "52",
            "--gender",
            "female",
            "--pregnancies",
            "2",
            "--family-history",
            "1",
            "--mode",
            "logistic",
            "--format",
            "json",
        ])
        .unwrap();
        let Command::Assess(args) = cli.into_command() else {
            panic!("expected assess");
        };
        let inputs = args.patient.to_inputs();
        assert_eq!(inputs.age, 52.0);
        assert_eq!(inputs.gender, Gender::Female);
        assert_eq!(inputs.pregnancies, 2.0);
        assert!(inputs.family_history);
        assert_eq!(args.mode, Some(ScoringMode::Logistic));
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_rejects_bad_flag_values() {
        assert!(Cli::try_parse_from(["diabetes-risk", "--hypertension", "2"]).is_err());
        assert!(Cli::try_parse_from(["diabetes-risk", "--gender", "robot"]).is_err());
    }

    #[test]
    fn test_info_subcommand() {
        let cli = Cli::try_parse_from(["diabetes-risk", "info", "--model", "m.onnx"]).unwrap();
        assert_eq!(cli.model, Some(PathBuf::from("m.onnx")));
        assert!(matches!(cli.into_command(), Command::Info));
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "diabetes-risk",
            "--preset",
            "narrow",
            "--high-cut",
            "60",
        ])
        .unwrap();
        let Command::Assess(args) = cli.into_command() else {
            panic!("expected assess");
        };
        let mut scoring = ScoringSettings::default();
        args.apply_overrides(&mut scoring);
        assert_eq!(scoring.preset, ThresholdPreset::Narrow);
        assert_eq!(scoring.high_cut, Some(60.0));
        assert_eq!(scoring.low_cut, None);
        assert_eq!(scoring.thresholds().unwrap().low_cut(), 35.0);
    }
}
