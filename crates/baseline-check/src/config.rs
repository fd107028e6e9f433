//! Configuration loading.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::fs;
use std::io;
use thiserror::Error;

/// File name looked up in the workspace root.
pub const CONFIG_FILE: &str = "baseline-check.json";

const DEFAULT_EXTENSIONS: [&str; 5] = ["html", "htm", "css", "scss", "less"];

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read {path}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid.
    #[error("invalid configuration in {path}")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Project configuration from `baseline-check.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct CheckConfig {
    /// Feature dataset path, relative to the configuration file.
    pub features: Option<Utf8PathBuf>,

    /// Additional tags to report as deprecated.
    pub deprecated_tags: Vec<String>,

    /// Glob patterns to ignore.
    pub ignore: Vec<String>,

    /// File extensions to check, with or without the leading dot.
    pub extensions: Vec<String>,
}

impl CheckConfig {
    /// Loads the configuration at `path`.
    ///
    /// A relative `features` path is resolved against the file's directory.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: CheckConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if let (Some(features), Some(dir)) = (&config.features, path.parent()) {
            if features.is_relative() {
                config.features = Some(dir.join(features));
            }
        }

        tracing::debug!(%path, "loaded configuration");
        Ok(config)
    }

    /// Loads `baseline-check.json` from `root`, or the defaults when there is none.
    pub fn find(root: &Utf8Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILE);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the extensions to check, lower-cased and without dots.
    pub fn file_extensions(&self) -> Vec<String> {
        if self.extensions.is_empty() {
            DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect()
        } else {
            self.extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
                .collect()
        }
    }
}
