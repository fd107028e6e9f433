//! Baseline feature scanning for HTML and CSS source text.
//!
//! The scanner recognizes CSS properties and at-rules, HTML elements and
//! attributes (including CSS inside `<style>` elements) with line-oriented
//! pattern matching, maps each construct to a web-platform feature, and
//! reports those that are not Baseline or are deprecated.
//!
//! Matching is heuristic: comments and string contents are not skipped, and
//! attributes are only read up to the end of the line their tag starts on.
//!
//! # Example
//!
//! ```
//! use baseline_scanner::{IssueStatus, LanguageKind, ScanOptions, Scanner};
//! use web_features::{FeatureDatabase, FeatureIndex};
//!
//! let db = FeatureDatabase::from_json_str(r#"{
//!     "text-box": {
//!         "status": { "baseline": false },
//!         "compat_features": ["css.properties.text-box"]
//!     }
//! }"#).unwrap();
//! let index = FeatureIndex::build(&db);
//!
//! let result = Scanner::new(&db, &index).scan(
//!     ".a { text-box: trim; }",
//!     LanguageKind::Css,
//!     &ScanOptions::default(),
//! );
//!
//! assert_eq!(result.issues.len(), 1);
//! assert_eq!(result.issues[0].status, IssueStatus::NotBaseline);
//! ```

mod candidate;
mod css;
mod html;
mod issue;
mod language;

pub use issue::{issue_message, IssueStatus, ScanIssue};
pub use language::LanguageKind;

use source_map::{EmbeddedRegion, LineIndex};
use web_features::{FeatureDatabase, FeatureIndex, TagOverrides};

/// Options for a single scan.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Additional tag names to report as deprecated when the feature data
    /// has no entry for them.
    pub deprecated_tags: Vec<String>,
}

impl ScanOptions {
    /// Adds a tag to report as deprecated.
    pub fn with_deprecated_tag(mut self, tag: impl Into<String>) -> Self {
        self.deprecated_tags.push(tag.into());
        self
    }
}

/// The issues found in one document, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub issues: Vec<ScanIssue>,
}

impl ScanResult {
    /// Returns true if nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Scans documents against a feature database and its lookup tables.
///
/// Both are only read, so one scanner (or many) can be used from several
/// threads at once.
#[derive(Debug, Clone, Copy)]
pub struct Scanner<'a> {
    db: &'a FeatureDatabase,
    index: &'a FeatureIndex,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner. `index` must have been built from `db`.
    pub fn new(db: &'a FeatureDatabase, index: &'a FeatureIndex) -> Self {
        Self { db, index }
    }

    /// Scans `text` as the given language.
    pub fn scan(&self, text: &str, language: LanguageKind, options: &ScanOptions) -> ScanResult {
        let _span = tracing::debug_span!("scan", %language, bytes = text.len()).entered();

        let mut candidates = Vec::new();
        match language {
            LanguageKind::Html => {
                let overrides = TagOverrides::with_extra(&options.deprecated_tags);
                html::match_html(
                    text,
                    EmbeddedRegion::root(),
                    self.index,
                    &overrides,
                    &mut candidates,
                );
            }
            LanguageKind::Css | LanguageKind::Scss | LanguageKind::Less => {
                css::match_css(text, EmbeddedRegion::root(), self.index, &mut candidates);
            }
        }

        let candidate_count = candidates.len();
        let issues = issue::aggregate(candidates, self.db, &LineIndex::new(text));
        tracing::debug!(candidates = candidate_count, issues = issues.len(), "scan finished");

        ScanResult { issues }
    }

    /// Scans `text` identified by an editor language id such as `"scss"`.
    ///
    /// Unsupported languages produce an empty result.
    pub fn scan_language_id(
        &self,
        text: &str,
        language_id: &str,
        options: &ScanOptions,
    ) -> ScanResult {
        match LanguageKind::from_id(language_id) {
            Some(language) => self.scan(text, language, options),
            None => {
                tracing::debug!(language_id, "skipping unsupported language");
                ScanResult::default()
            }
        }
    }
}
