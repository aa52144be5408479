//! Diabetes Risk Command-Line Front End
//!
//! Parses patient inputs, loads the model once, and prints the assessment.

pub mod args;
pub mod report;
pub mod settings;

use anyhow::Context;
use args::{Cli, Command};
use inference_engine::InferenceEngine;
use settings::{LoggingSettings, Settings};
use std::io::Write;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Initialize logging on stderr; `RUST_LOG` wins over the configured level
pub fn init_logging(settings: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    let result = if settings.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(e) = result {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Run the parsed command line
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let mut settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            // No configured level yet; log the failure with the defaults
            init_logging(&LoggingSettings::default());
            return Err(anyhow::Error::new(e).context("loading configuration"));
        }
    };
    if let Some(model) = &cli.model {
        settings.model.path = model.clone();
    }

    let command = cli.into_command();
    if let Command::Assess(args) = &command {
        args.apply_overrides(&mut settings.scoring);
    }

    init_logging(&settings.logging);
    info!("=== Diabetes Risk v{} ===", env!("CARGO_PKG_VERSION"));

    let engine_config = settings
        .engine_config()
        .context("invalid scoring configuration")?;
    let engine = InferenceEngine::load(&engine_config).context("loading model")?;

    let output = match command {
        Command::Assess(args) => {
            let inputs = args.patient_inputs()?;
            let report = engine.assess(&inputs).context("scoring patient")?;
            info!(
                "Assessment complete: {:.2}% ({})",
                report.assessment.percent, report.assessment.label
            );
            report::render(&report, args.format)?
        }
        Command::Info => report::render_info(&engine)?,
    };

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
