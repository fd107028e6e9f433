//! Web-platform feature data for baseline-check.
//!
//! This crate loads a feature database (feature id → status and
//! compatibility keys), builds the lookup tables the scanner consults, and
//! classifies features as Baseline, not Baseline, or deprecated.
//!
//! # Example
//!
//! ```
//! use web_features::{FeatureDatabase, FeatureIndex, FeatureStatus};
//!
//! let db = FeatureDatabase::from_json_str(r#"{
//!     "text-box": {
//!         "status": { "baseline": false },
//!         "compat_features": ["css.properties.text-box"]
//!     }
//! }"#).unwrap();
//! let index = FeatureIndex::build(&db);
//!
//! let id = index.css("text-box").unwrap();
//! assert_eq!(db.status(id), FeatureStatus::NotBaseline);
//! ```

mod cache;
mod database;
mod error;
mod index;
mod overrides;
mod status;

pub use cache::IndexCache;
pub use database::{BaselineLevel, DatasetVersion, FeatureDatabase, FeatureRecord, StatusBlock};
pub use error::LoadError;
pub use index::{FeatureIndex, IndexStats};
pub use overrides::{TagOverrides, OBSOLETE_ELEMENTS};
pub use status::FeatureStatus;
