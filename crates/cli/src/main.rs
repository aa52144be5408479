//! Diabetes Risk Assessment - Main Entry Point

use clap::Parser;
use tracing::error;

fn main() -> anyhow::Result<()> {
    let args = cli::args::Cli::parse();
    cli::run(args).inspect_err(|e| error!("{:#}", e))
}
