//! Issue types and aggregation of candidates into issues.

use crate::candidate::{Candidate, Resolution};
use serde::Serialize;
use smol_str::SmolStr;
use source_map::{LineIndex, LineRange, Span};
use std::fmt;
use web_features::{FeatureDatabase, FeatureStatus};

/// The status of a reported feature. Baseline features are never reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueStatus {
    NotBaseline,
    Deprecated,
}

impl IssueStatus {
    /// Converts a resolved status, returning `None` for Baseline.
    pub fn from_feature(status: FeatureStatus) -> Option<IssueStatus> {
        if !status.is_reportable() {
            return None;
        }
        Some(match status {
            FeatureStatus::Deprecated => IssueStatus::Deprecated,
            _ => IssueStatus::NotBaseline,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::NotBaseline => "not-baseline",
            IssueStatus::Deprecated => "deprecated",
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-Baseline feature usage found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanIssue {
    /// Line and column range in the scanned document.
    #[serde(flatten)]
    pub range: LineRange,
    /// Absolute byte span in the scanned document.
    #[serde(skip)]
    pub span: Span,
    pub feature_id: SmolStr,
    pub status: IssueStatus,
    /// The matched construct as shown in the message.
    pub token: String,
    pub message: String,
}

/// Builds the message shown for an issue.
pub fn issue_message(token: &str, status: IssueStatus) -> String {
    format!("Feature \"{token}\" is {status} in Baseline")
}

/// Resolves candidates, drops Baseline ones and orders the rest by position.
pub(crate) fn aggregate(
    candidates: Vec<Candidate<'_>>,
    db: &FeatureDatabase,
    line_index: &LineIndex,
) -> Vec<ScanIssue> {
    let mut issues: Vec<ScanIssue> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let (feature_id, status) = match candidate.resolution {
                Resolution::Feature(id) => (SmolStr::new(id), db.status(id)),
                Resolution::Fixed { feature_id, status } => (feature_id, status),
            };
            let status = IssueStatus::from_feature(status)?;
            let range = line_index.line_range(candidate.span)?;

            Some(ScanIssue {
                range,
                span: candidate.span,
                feature_id,
                status,
                message: issue_message(&candidate.token, status),
                token: candidate.token,
            })
        })
        .collect();

    // Stable, so constructs at the same offset keep discovery order.
    issues.sort_by_key(|issue| issue.span.start);
    issues
}
