//! baseline-check: reports web-platform features that are not Baseline.

mod cli;
mod config;
mod orchestrator;
mod output;

use clap::Parser;
use cli::Args;
use miette::{IntoDiagnostic, Result};
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "BASELINE_CHECK_LOG";

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let summary = orchestrator::run(&args).into_diagnostic()?;
    if summary.failed() {
        std::process::exit(1);
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
