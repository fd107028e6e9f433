//! Main orchestration logic.

use crate::cli::{Args, OutputFormat, Threshold};
use crate::config::{CheckConfig, ConfigError};
use crate::output::{CheckSummary, FormattedIssue, Formatter, Severity};
use baseline_scanner::{IssueStatus, LanguageKind, ScanIssue, ScanOptions, Scanner};
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use rayon::prelude::*;
use std::fs;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;
use walkdir::WalkDir;
use web_features::{FeatureDatabase, FeatureIndex, LoadError};

const DEFAULT_IGNORES: [&str; 3] = ["**/node_modules/**", "**/dist/**", "**/.git/**"];

/// Check errors.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The working directory is unusable.
    #[error("cannot use the current directory")]
    WorkingDirectory(#[source] io::Error),

    /// The working directory is not valid UTF-8.
    #[error("the current directory is not valid UTF-8")]
    NonUtf8WorkingDirectory,

    /// A path given on the command line does not exist.
    #[error("no such file or directory: {0}")]
    MissingPath(Utf8PathBuf),

    /// Invalid glob pattern.
    #[error("invalid glob pattern: {pattern}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// The configuration file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The feature dataset could not be loaded.
    #[error("failed to load feature data")]
    Features(#[from] LoadError),
}

/// Settings for one run, from the command line merged over the configuration file.
#[derive(Debug)]
struct CheckSettings {
    features: Option<Utf8PathBuf>,
    options: ScanOptions,
    ignore: GlobSet,
    extensions: Vec<String>,
}

impl CheckSettings {
    fn merge(args: &Args, config: CheckConfig, workspace: &Utf8Path) -> Result<Self, CheckError> {
        let features = args
            .features
            .as_ref()
            .map(|path| workspace.join(path))
            .or(config.features.clone());

        let mut options = ScanOptions::default();
        for tag in config.deprecated_tags.iter().chain(&args.deprecated_tags) {
            options = options.with_deprecated_tag(tag.as_str());
        }

        let mut builder = GlobSetBuilder::new();
        let patterns = config
            .ignore
            .iter()
            .chain(&args.ignore)
            .map(String::as_str)
            .chain(DEFAULT_IGNORES);
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|source| CheckError::InvalidGlob {
                pattern: pattern.to_string(),
                source,
            })?;
            builder.add(glob);
        }
        let ignore = builder.build().map_err(|source| CheckError::InvalidGlob {
            pattern: "<ignore set>".to_string(),
            source,
        })?;

        Ok(Self {
            features,
            options,
            ignore,
            extensions: config.file_extensions(),
        })
    }

    fn language_of(&self, path: &Utf8Path) -> Option<LanguageKind> {
        let ext = path.extension()?.to_ascii_lowercase();
        if !self.extensions.iter().any(|allowed| *allowed == ext) {
            return None;
        }
        LanguageKind::from_extension(&ext)
    }
}

struct FileOutput {
    text: Option<String>,
    json: Vec<FormattedIssue>,
}

/// Runs the check on all files under `args.paths`.
pub fn run(args: &Args) -> Result<CheckSummary, CheckError> {
    let cwd = std::env::current_dir().map_err(CheckError::WorkingDirectory)?;
    let workspace =
        Utf8PathBuf::try_from(cwd).map_err(|_| CheckError::NonUtf8WorkingDirectory)?;

    let config = match &args.config {
        Some(path) => CheckConfig::load(&workspace.join(path))?,
        None => CheckConfig::find(&workspace)?,
    };
    let settings = CheckSettings::merge(args, config, &workspace)?;

    let db = match &settings.features {
        Some(path) => FeatureDatabase::from_path(path)?,
        None => FeatureDatabase::bundled()?,
    };
    if db.skipped() > 0 {
        tracing::warn!(skipped = db.skipped(), "ignored malformed feature records");
    }
    let index = FeatureIndex::build(&db);
    tracing::debug!(features = db.len(), version = %db.version(), "feature data ready");

    let files = collect_files(args, &settings, &workspace)?;
    tracing::debug!(files = files.len(), "collected files");

    let scanner = Scanner::new(&db, &index);
    let formatter = Formatter::new(args.output);
    let output_json = args.output == OutputFormat::Json;
    let error_count = AtomicUsize::new(0);
    let warning_count = AtomicUsize::new(0);

    let outputs: Vec<FileOutput> = files
        .par_iter()
        .filter_map(|(file_path, language)| {
            let source = match fs::read_to_string(file_path) {
                Ok(source) => source,
                Err(err) => {
                    tracing::warn!(path = %file_path, error = %err, "failed to read file");
                    return None;
                }
            };

            let mut issues = scanner.scan(&source, *language, &settings.options).issues;
            issues.retain(|issue| include_status(issue.status, args.threshold));

            for issue in &issues {
                match Severity::of(issue.status) {
                    Severity::Error => error_count.fetch_add(1, Ordering::Relaxed),
                    Severity::Warning => warning_count.fetch_add(1, Ordering::Relaxed),
                };
            }

            if issues.is_empty() {
                return None;
            }

            let relative_path = file_path.strip_prefix(&workspace).unwrap_or(file_path);
            Some(render(&formatter, output_json, &issues, relative_path, &source))
        })
        .collect();

    let summary = CheckSummary {
        file_count: files.len(),
        error_count: error_count.load(Ordering::Relaxed),
        warning_count: warning_count.load(Ordering::Relaxed),
        fail_on_warnings: args.fail_on_warnings,
    };

    if output_json {
        let json_output: Vec<FormattedIssue> =
            outputs.into_iter().flat_map(|output| output.json).collect();
        let json = serde_json::to_string_pretty(&json_output).unwrap_or_else(|_| "[]".to_string());
        println!("{}", json);
    } else {
        for output in outputs {
            if let Some(text) = output.text {
                print!("{}", text);
            }
        }
        println!("{}", summary.format());
    }

    Ok(summary)
}

fn render(
    formatter: &Formatter,
    output_json: bool,
    issues: &[ScanIssue],
    path: &Utf8Path,
    source: &str,
) -> FileOutput {
    if output_json {
        FileOutput {
            text: None,
            json: Formatter::format_json_issues(issues, path),
        }
    } else {
        FileOutput {
            text: Some(formatter.format(issues, path, source)),
            json: Vec::new(),
        }
    }
}

/// Walks the requested paths and returns the files to check, sorted and deduplicated.
fn collect_files(
    args: &Args,
    settings: &CheckSettings,
    workspace: &Utf8Path,
) -> Result<Vec<(Utf8PathBuf, LanguageKind)>, CheckError> {
    let mut files = Vec::new();

    for path in &args.paths {
        let root = workspace.join(path);
        if !root.exists() {
            return Err(CheckError::MissingPath(path.clone()));
        }

        let entries = WalkDir::new(&root)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| Utf8PathBuf::try_from(entry.into_path()).ok());

        for file in entries {
            let relative = file.strip_prefix(workspace).unwrap_or(&file);
            if settings.ignore.is_match(relative.as_str()) {
                continue;
            }
            if let Some(language) = settings.language_of(&file) {
                files.push((file, language));
            }
        }
    }

    files.sort_by(|a, b| a.0.cmp(&b.0));
    files.dedup_by(|a, b| a.0 == b.0);
    Ok(files)
}

fn include_status(status: IssueStatus, threshold: Threshold) -> bool {
    match threshold {
        Threshold::Deprecated => status == IssueStatus::Deprecated,
        Threshold::NotBaseline => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    fn settings(args: &[&str], config: CheckConfig) -> CheckSettings {
        let args = Args::parse_from(std::iter::once("baseline-check").chain(args.iter().copied()));
        CheckSettings::merge(&args, config, Utf8Path::new("/project")).unwrap()
    }

    #[test]
    fn test_threshold() {
        assert!(include_status(IssueStatus::Deprecated, Threshold::Deprecated));
        assert!(!include_status(IssueStatus::NotBaseline, Threshold::Deprecated));
        assert!(include_status(IssueStatus::NotBaseline, Threshold::NotBaseline));
    }

    #[test]
    fn test_cli_features_win_over_config() {
        let config = CheckConfig {
            features: Some(Utf8PathBuf::from("/project/config.json")),
            ..Default::default()
        };
        assert_eq!(
            settings(&["--features", "cli.json"], config.clone()).features,
            Some(Utf8PathBuf::from("/project/cli.json"))
        );
        assert_eq!(
            settings(&[], config).features,
            Some(Utf8PathBuf::from("/project/config.json"))
        );
    }

    #[test]
    fn test_tags_and_ignores_are_appended() {
        let config = CheckConfig {
            deprecated_tags: vec!["x-old".to_string()],
            ignore: vec!["vendor/**".to_string()],
            ..Default::default()
        };
        let merged = settings(&["--deprecated-tag", "x-older", "--ignore", "*.min.css"], config);

        assert_eq!(merged.options.deprecated_tags, vec!["x-old", "x-older"]);
        assert!(merged.ignore.is_match("vendor/a.css"));
        assert!(merged.ignore.is_match("site.min.css"));
        assert!(merged.ignore.is_match("web/node_modules/pkg/a.css"));
        assert!(!merged.ignore.is_match("src/a.css"));
    }

    #[test]
    fn test_invalid_glob() {
        let args = Args::parse_from(["baseline-check", "--ignore", "a/{b"]);
        let err = CheckSettings::merge(&args, CheckConfig::default(), Utf8Path::new("/project"))
            .unwrap_err();
        assert!(matches!(err, CheckError::InvalidGlob { .. }));
    }

    #[test]
    fn test_language_of_respects_extensions() {
        let merged = settings(&[], CheckConfig::default());
        assert_eq!(
            merged.language_of(Utf8Path::new("a/index.HTM")),
            Some(LanguageKind::Html)
        );
        assert_eq!(merged.language_of(Utf8Path::new("a/app.svelte")), None);

        let css_only = settings(
            &[],
            CheckConfig {
                extensions: vec!["css".to_string()],
                ..Default::default()
            },
        );
        assert_eq!(
            css_only.language_of(Utf8Path::new("a.css")),
            Some(LanguageKind::Css)
        );
        assert_eq!(css_only.language_of(Utf8Path::new("a.html")), None);
    }
}
