//! CLI argument parsing.

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};

/// Reports web-platform features that are not Baseline in HTML and CSS files.
#[derive(Debug, Parser)]
#[command(name = "baseline-check")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Files or directories to check
    #[arg(default_value = ".")]
    pub paths: Vec<Utf8PathBuf>,

    /// Feature dataset to use instead of the bundled one
    #[arg(long)]
    pub features: Option<Utf8PathBuf>,

    /// Additional tag to report as deprecated (repeatable)
    #[arg(long = "deprecated-tag", value_name = "TAG")]
    pub deprecated_tags: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Minimum status to report
    #[arg(long, value_enum, default_value = "not-baseline")]
    pub threshold: Threshold,

    /// Glob patterns to ignore
    #[arg(long)]
    pub ignore: Vec<String>,

    /// Exit with error on warnings
    #[arg(long = "fail-on-warnings")]
    pub fail_on_warnings: bool,

    /// Path to a configuration file (defaults to ./baseline-check.json)
    #[arg(long)]
    pub config: Option<Utf8PathBuf>,

    /// Log scanning details to stderr
    #[arg(long, short)]
    pub verbose: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// Human-readable with code snippets
    HumanVerbose,
    /// JSON output
    Json,
    /// Machine-readable (one line per issue)
    Machine,
}

/// Status threshold.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum Threshold {
    /// Only report deprecated features
    Deprecated,
    /// Report deprecated and not-yet-Baseline features (default)
    #[default]
    NotBaseline,
}
