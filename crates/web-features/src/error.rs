//! Feature database load errors.

use camino::Utf8PathBuf;
use thiserror::Error;

/// An error that prevents a feature database from loading at all.
///
/// Individual malformed records never produce an error; they are skipped.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The dataset file could not be read.
    #[error("failed to read feature data from {path}")]
    Io {
        /// The path that was read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The dataset is not valid JSON.
    #[error("feature data is not valid JSON")]
    Json(#[from] serde_json::Error),

    /// The dataset parsed, but its top level is not an object of features.
    #[error("feature data must be a JSON object keyed by feature id")]
    NotAnObject,
}
