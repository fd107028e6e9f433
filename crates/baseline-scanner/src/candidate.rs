//! Matched constructs awaiting status resolution.

use smol_str::SmolStr;
use source_map::Span;
use web_features::FeatureStatus;

/// How a candidate's status is determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Resolution<'i> {
    /// A feature id from the lookup tables, resolved against the database.
    Feature(&'i str),
    /// A tag override: the id is synthetic and the status is final.
    Fixed {
        feature_id: SmolStr,
        status: FeatureStatus,
    },
}

/// A recognized construct with the feature it maps to and its absolute span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Candidate<'i> {
    /// Human-readable token, e.g. `text-box`, `img[loading]`, `[popover]`.
    pub token: String,
    pub resolution: Resolution<'i>,
    pub span: Span,
}

impl<'i> Candidate<'i> {
    pub fn feature(token: impl Into<String>, feature_id: &'i str, span: Span) -> Self {
        Self {
            token: token.into(),
            resolution: Resolution::Feature(feature_id),
            span,
        }
    }

    pub fn fixed(
        token: impl Into<String>,
        feature_id: SmolStr,
        status: FeatureStatus,
        span: Span,
    ) -> Self {
        Self {
            token: token.into(),
            resolution: Resolution::Fixed { feature_id, status },
            span,
        }
    }
}
