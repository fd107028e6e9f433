//! Checks the dataset compiled into the crate against the index and resolver.

use camino::Utf8PathBuf;
use pretty_assertions::assert_eq;
use std::fs;
use web_features::{FeatureDatabase, FeatureIndex, FeatureStatus, IndexCache};

fn bundled() -> (FeatureDatabase, FeatureIndex) {
    let db = FeatureDatabase::bundled().expect("bundled dataset should parse");
    let index = FeatureIndex::build(&db);
    (db, index)
}

#[test]
fn css_properties_resolve() {
    let (db, index) = bundled();

    let id = index.css("text-box").unwrap();
    assert_eq!(id, "text-box");
    assert_eq!(db.status(id), FeatureStatus::NotBaseline);

    let id = index.css("container-type").unwrap();
    assert_eq!(db.status(id), FeatureStatus::Baseline);

    let id = index.css("@position-try").unwrap();
    assert_eq!(id, "anchor-positioning");
    assert_eq!(db.status(id), FeatureStatus::NotBaseline);
}

#[test]
fn discouraged_feature_is_deprecated_despite_high_baseline() {
    let (db, index) = bundled();
    let id = index.css("clip").unwrap();
    assert_eq!(db.status(id), FeatureStatus::Deprecated);
}

#[test]
fn html_tables_resolve() {
    let (db, index) = bundled();

    assert_eq!(index.tag("dialog"), Some("dialog"));
    assert_eq!(index.tag_attr("button", "commandfor"), Some("invoker-commands"));
    assert_eq!(index.global_attr("popover"), Some("popover"));
    assert_eq!(db.status("invoker-commands"), FeatureStatus::NotBaseline);

    // Only tracked as an API, so no attribute entry exists.
    assert_eq!(index.tag_attr("dialog", "closedby"), None);
    assert_eq!(index.global_attr("closedby"), None);
}

#[test]
fn file_and_bundled_load_identically() {
    let dir = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::try_from(dir.path().join("features.json")).unwrap();
    let json = fs::read_to_string(
        Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/features.json"),
    )
    .unwrap();
    fs::write(&path, &json).unwrap();

    let from_file = FeatureDatabase::from_path(&path).unwrap();
    let (bundled, _) = bundled();
    assert_eq!(from_file.version(), bundled.version());
    assert_eq!(from_file.len(), bundled.len());

    let mut cache = IndexCache::new();
    let a = cache.get_or_build(&from_file);
    let b = cache.get_or_build(&bundled);
    assert!(std::sync::Arc::ptr_eq(&a, &b));
}
