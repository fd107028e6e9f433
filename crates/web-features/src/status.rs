//! Baseline status resolution.

use crate::{BaselineLevel, FeatureDatabase, FeatureRecord};
use serde::Serialize;
use std::fmt;

/// The classification of a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureStatus {
    /// Safe to use.
    Baseline,
    /// Not yet Baseline, or unknown.
    NotBaseline,
    /// Deprecated, discouraged or obsolete.
    Deprecated,
}

impl FeatureStatus {
    /// Returns the status as it appears in messages and serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureStatus::Baseline => "baseline",
            FeatureStatus::NotBaseline => "not-baseline",
            FeatureStatus::Deprecated => "deprecated",
        }
    }

    /// Returns true for statuses that should be reported.
    #[inline]
    pub fn is_reportable(&self) -> bool {
        !matches!(self, FeatureStatus::Baseline)
    }

    /// Classifies a record. A missing record is treated as not Baseline.
    pub fn of(record: Option<&FeatureRecord>) -> FeatureStatus {
        let Some(record) = record else {
            return FeatureStatus::NotBaseline;
        };

        // Deprecation is checked before coverage.
        if record.discouraged || record.status.deprecated || is_obsolete(&record.status.maturity) {
            return FeatureStatus::Deprecated;
        }

        match record.status.baseline {
            Some(BaselineLevel::High | BaselineLevel::Low) => FeatureStatus::Baseline,
            Some(BaselineLevel::False) => FeatureStatus::NotBaseline,
            None => FeatureStatus::Baseline,
        }
    }
}

fn is_obsolete(maturity: &Option<String>) -> bool {
    maturity.as_deref().is_some_and(|m| {
        m.eq_ignore_ascii_case("deprecated") || m.eq_ignore_ascii_case("obsolete")
    })
}

impl fmt::Display for FeatureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FeatureDatabase {
    /// Classifies the feature with the given id.
    pub fn status(&self, id: &str) -> FeatureStatus {
        FeatureStatus::of(self.get(id))
    }
}
