//! Feature database loading.

use crate::LoadError;
use camino::Utf8Path;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use smol_str::SmolStr;
use std::fmt;
use std::fs;

static BUNDLED_FEATURES: &str = include_str!("../data/features.json");

/// Baseline coverage level of a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaselineLevel {
    /// Widely available.
    High,
    /// Newly available.
    Low,
    /// Explicitly not Baseline (`false` in the data).
    False,
}

/// The `status` block of a feature record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StatusBlock {
    /// Baseline level; `None` when the data carries no usable value.
    #[serde(default, deserialize_with = "deserialize_baseline")]
    pub baseline: Option<BaselineLevel>,
    /// Whether the status block marks the feature deprecated.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub deprecated: bool,
    /// Free-form maturity string (e.g. `"obsolete"`).
    #[serde(default)]
    pub maturity: Option<String>,
}

/// A single feature and the compatibility keys it claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRecord {
    /// Globally unique feature id.
    pub id: SmolStr,
    /// Status metadata; defaulted when the record has none.
    pub status: StatusBlock,
    /// Whether the record carries a `discouraged` block.
    pub discouraged: bool,
    /// Dotted compatibility keys such as `css.properties.text-box`.
    pub compat_features: Vec<SmolStr>,
}

impl FeatureRecord {
    /// Creates a record with default status and no compatibility keys.
    pub fn new(id: impl Into<SmolStr>) -> Self {
        Self {
            id: id.into(),
            status: StatusBlock::default(),
            discouraged: false,
            compat_features: Vec::new(),
        }
    }

    /// Sets the baseline level.
    pub fn with_baseline(mut self, baseline: BaselineLevel) -> Self {
        self.status.baseline = Some(baseline);
        self
    }

    /// Marks the status block deprecated.
    pub fn deprecated(mut self) -> Self {
        self.status.deprecated = true;
        self
    }

    /// Marks the record discouraged.
    pub fn discouraged(mut self) -> Self {
        self.discouraged = true;
        self
    }

    /// Sets the maturity string.
    pub fn with_maturity(mut self, maturity: impl Into<String>) -> Self {
        self.status.maturity = Some(maturity.into());
        self
    }

    /// Adds a compatibility key.
    pub fn with_compat(mut self, key: impl Into<SmolStr>) -> Self {
        self.compat_features.push(key.into());
        self
    }
}

#[derive(Deserialize)]
struct RawRecord {
    #[serde(default)]
    status: Option<StatusBlock>,
    #[serde(default)]
    discouraged: Option<Value>,
    #[serde(default)]
    compat_features: Option<Vec<SmolStr>>,
}

fn deserialize_baseline<'de, D>(deserializer: D) -> Result<Option<BaselineLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(level) if level == "high" => Some(BaselineLevel::High),
        Value::String(level) if level == "low" => Some(BaselineLevel::Low),
        Value::Bool(false) => Some(BaselineLevel::False),
        _ => None,
    })
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Identifies the content of a feature database, for cache invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DatasetVersion(blake3::Hash);

impl fmt::Display for DatasetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_hex()[..16])
    }
}

/// An immutable collection of feature records in dataset order.
#[derive(Debug, Clone)]
pub struct FeatureDatabase {
    records: IndexMap<SmolStr, FeatureRecord>,
    version: DatasetVersion,
    skipped: usize,
}

impl FeatureDatabase {
    /// Parses a dataset from JSON text.
    ///
    /// Both `{ id: record }` and the published `{ "features": { id: record } }`
    /// layouts are accepted. Records that fail to deserialize are skipped.
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let root: Value = serde_json::from_str(json)?;
        let Value::Object(mut root) = root else {
            return Err(LoadError::NotAnObject);
        };

        let entries = match root.remove("features") {
            Some(Value::Object(features)) if !features.contains_key("compat_features") => {
                features
            }
            Some(other) => {
                root.insert("features".to_string(), other);
                root
            }
            None => root,
        };

        let mut records = IndexMap::with_capacity(entries.len());
        let mut skipped = 0;
        for (id, value) in entries {
            match RawRecord::deserialize(value) {
                Ok(raw) => {
                    let id = SmolStr::from(id);
                    records.insert(
                        id.clone(),
                        FeatureRecord {
                            id,
                            status: raw.status.unwrap_or_default(),
                            discouraged: raw.discouraged.is_some(),
                            compat_features: raw.compat_features.unwrap_or_default(),
                        },
                    );
                }
                Err(err) => {
                    tracing::debug!(
                        feature = %id,
                        error = %err,
                        "skipping malformed feature record"
                    );
                    skipped += 1;
                }
            }
        }

        Ok(Self {
            records,
            version: DatasetVersion(blake3::hash(json.as_bytes())),
            skipped,
        })
    }

    /// Reads and parses a dataset file.
    pub fn from_path(path: &Utf8Path) -> Result<Self, LoadError> {
        let json = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Loads the dataset compiled into this crate.
    pub fn bundled() -> Result<Self, LoadError> {
        Self::from_json_str(BUNDLED_FEATURES)
    }

    /// Builds a database from records, keeping the last record for a repeated id.
    pub fn from_records(records: impl IntoIterator<Item = FeatureRecord>) -> Self {
        let mut hasher = blake3::Hasher::new();
        let mut map = IndexMap::new();
        for record in records {
            hasher.update(record.id.as_bytes());
            hasher.update(format!("{:?}{}", record.status, record.discouraged).as_bytes());
            for key in &record.compat_features {
                hasher.update(key.as_bytes());
            }
            hasher.update(&[0]);
            map.insert(record.id.clone(), record);
        }

        Self {
            records: map,
            version: DatasetVersion(hasher.finalize()),
            skipped: 0,
        }
    }

    /// Returns the record for a feature id.
    pub fn get(&self, id: &str) -> Option<&FeatureRecord> {
        self.records.get(id)
    }

    /// Iterates records in dataset order.
    pub fn records(&self) -> impl Iterator<Item = &FeatureRecord> {
        self.records.values()
    }

    /// Returns the number of loaded records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records were loaded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of records skipped as malformed.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Returns the content digest of this dataset.
    pub fn version(&self) -> DatasetVersion {
        self.version
    }
}
