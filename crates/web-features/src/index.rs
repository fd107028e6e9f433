//! Lookup tables from syntactic tokens to feature ids.

use crate::FeatureDatabase;
use rustc_hash::FxHashMap;
use smol_str::{format_smolstr, SmolStr};

/// A compatibility key classified by the token shape it describes.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CompatKey<'a> {
    /// A CSS property name, or an at-rule name prefixed with `@`.
    Css(SmolStr),
    Tag(&'a str),
    TagAttr(&'a str, &'a str),
    TagAttrValue(&'a str, &'a str, &'a str),
    GlobalAttr(&'a str),
}

impl<'a> CompatKey<'a> {
    /// Classifies a dotted compatibility key. Unrecognized shapes yield `None`.
    fn classify(key: &'a str) -> Option<CompatKey<'a>> {
        let segments: Vec<&str> = key.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return None;
        }

        match segments[..] {
            ["css", "properties", name] => Some(CompatKey::Css(SmolStr::new(name))),
            ["css", "at-rules", name] => Some(CompatKey::Css(format_smolstr!("@{name}"))),
            ["html", "elements", tag] => Some(CompatKey::Tag(tag)),
            ["html", "elements", tag, "attributes", attr] => Some(CompatKey::TagAttr(tag, attr)),
            ["html", "elements", tag, "attributes", attr, value] => {
                Some(CompatKey::TagAttrValue(tag, attr, value))
            }
            ["html", "elements", _, "attributes"] => None,
            ["html", "elements", tag, attr] => Some(CompatKey::TagAttr(tag, attr)),
            ["html", "elements", tag, attr, value] => {
                Some(CompatKey::TagAttrValue(tag, attr, value))
            }
            ["html", "global_attributes" | "attributes", attr] => Some(CompatKey::GlobalAttr(attr)),
            _ => None,
        }
    }
}

/// Sizes of the lookup tables, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexStats {
    pub css: usize,
    pub tags: usize,
    pub tag_attrs: usize,
    pub tag_attr_values: usize,
    pub global_attrs: usize,
    /// Compatibility keys with no recognized shape.
    pub ignored_keys: usize,
}

/// Token → feature id lookup tables built from a [`FeatureDatabase`].
///
/// All keys are lower-cased. When two features claim the same key the one
/// later in dataset order wins.
#[derive(Debug, Clone, Default)]
pub struct FeatureIndex {
    css: FxHashMap<SmolStr, SmolStr>,
    tags: FxHashMap<SmolStr, SmolStr>,
    tag_attrs: FxHashMap<SmolStr, SmolStr>,
    tag_attr_values: FxHashMap<SmolStr, SmolStr>,
    global_attrs: FxHashMap<SmolStr, SmolStr>,
    ignored_keys: usize,
}

impl FeatureIndex {
    /// Builds the lookup tables for every compatibility key in the database.
    pub fn build(db: &FeatureDatabase) -> Self {
        let mut index = FeatureIndex::default();

        for record in db.records() {
            for key in &record.compat_features {
                let Some(class) = CompatKey::classify(key) else {
                    index.ignored_keys += 1;
                    continue;
                };

                let (table, key) = match class {
                    CompatKey::Css(name) => (&mut index.css, name),
                    CompatKey::Tag(tag) => (&mut index.tags, SmolStr::new(tag)),
                    CompatKey::TagAttr(tag, attr) => {
                        (&mut index.tag_attrs, format_smolstr!("{tag}:{attr}"))
                    }
                    CompatKey::TagAttrValue(tag, attr, value) => (
                        &mut index.tag_attr_values,
                        format_smolstr!("{tag}:{attr}:{value}"),
                    ),
                    CompatKey::GlobalAttr(attr) => (&mut index.global_attrs, SmolStr::new(attr)),
                };

                table.insert(lowercase(&key), record.id.clone());
            }
        }

        tracing::debug!(stats = ?index.stats(), "built feature index");
        index
    }

    /// Looks up a CSS property, or an at-rule written as `@name`.
    pub fn css(&self, name: &str) -> Option<&str> {
        self.css.get(&lowercase(name)).map(SmolStr::as_str)
    }

    /// Looks up an HTML element.
    pub fn tag(&self, tag: &str) -> Option<&str> {
        self.tags.get(&lowercase(tag)).map(SmolStr::as_str)
    }

    /// Looks up an attribute of a specific element.
    pub fn tag_attr(&self, tag: &str, attr: &str) -> Option<&str> {
        self.tag_attrs
            .get(&lowercase(&format!("{tag}:{attr}")))
            .map(SmolStr::as_str)
    }

    /// Looks up a specific value of an element attribute.
    pub fn tag_attr_value(&self, tag: &str, attr: &str, value: &str) -> Option<&str> {
        self.tag_attr_values
            .get(&lowercase(&format!("{tag}:{attr}:{value}")))
            .map(SmolStr::as_str)
    }

    /// Looks up a global attribute.
    pub fn global_attr(&self, attr: &str) -> Option<&str> {
        self.global_attrs.get(&lowercase(attr)).map(SmolStr::as_str)
    }

    /// Returns the table sizes.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            css: self.css.len(),
            tags: self.tags.len(),
            tag_attrs: self.tag_attrs.len(),
            tag_attr_values: self.tag_attr_values.len(),
            global_attrs: self.global_attrs.len(),
            ignored_keys: self.ignored_keys,
        }
    }
}

fn lowercase(s: &str) -> SmolStr {
    if s.bytes().any(|b| b.is_ascii_uppercase()) {
        SmolStr::new(s.to_ascii_lowercase())
    } else {
        SmolStr::new(s)
    }
}
