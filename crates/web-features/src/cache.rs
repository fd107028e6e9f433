//! Reuse of built lookup tables across scans.

use crate::{DatasetVersion, FeatureDatabase, FeatureIndex};
use std::sync::Arc;

/// Holds the most recently built [`FeatureIndex`] together with the dataset
/// version it was built from.
///
/// The index is rebuilt whenever a database with a different version is
/// passed in. The returned `Arc` is read-only and can be shared across threads.
#[derive(Debug, Default)]
pub struct IndexCache {
    entry: Option<(DatasetVersion, Arc<FeatureIndex>)>,
}

impl IndexCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index for `db`, building it if the cache is empty or stale.
    pub fn get_or_build(&mut self, db: &FeatureDatabase) -> Arc<FeatureIndex> {
        let version = db.version();
        if let Some((cached, index)) = &self.entry {
            if *cached == version {
                return Arc::clone(index);
            }
        }

        tracing::debug!(%version, "building feature index");
        let index = Arc::new(FeatureIndex::build(db));
        self.entry = Some((version, Arc::clone(&index)));
        index
    }

    /// Returns the version of the cached index, if any.
    pub fn cached_version(&self) -> Option<DatasetVersion> {
        self.entry.as_ref().map(|(version, _)| *version)
    }

    /// Drops the cached index.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}
