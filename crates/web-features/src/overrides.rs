//! Fixed statuses for HTML elements the feature data does not classify.

use crate::FeatureStatus;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

/// Obsolete HTML elements that are reported as deprecated by default.
pub const OBSOLETE_ELEMENTS: &[&str] = &[
    "acronym",
    "applet",
    "basefont",
    "bgsound",
    "big",
    "blink",
    "center",
    "dir",
    "font",
    "frame",
    "frameset",
    "isindex",
    "keygen",
    "marquee",
    "menuitem",
    "nobr",
    "noembed",
    "noframes",
    "plaintext",
    "strike",
    "tt",
    "xmp",
];

/// Lower-cased tag name → fixed status.
///
/// Consulted only for tags with no entry in the element lookup table.
#[derive(Debug, Clone)]
pub struct TagOverrides {
    tags: FxHashMap<SmolStr, FeatureStatus>,
}

impl Default for TagOverrides {
    fn default() -> Self {
        Self {
            tags: OBSOLETE_ELEMENTS
                .iter()
                .map(|tag| (SmolStr::new(tag), FeatureStatus::Deprecated))
                .collect(),
        }
    }
}

impl TagOverrides {
    /// Creates the default table extended with caller-supplied deprecated tags.
    pub fn with_extra<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut overrides = Self::default();
        for tag in tags {
            let tag = tag.as_ref().trim();
            if !tag.is_empty() {
                overrides
                    .tags
                    .insert(SmolStr::new(tag.to_ascii_lowercase()), FeatureStatus::Deprecated);
            }
        }
        overrides
    }

    /// Returns the fixed status for a tag, if any.
    pub fn get(&self, tag: &str) -> Option<FeatureStatus> {
        self.tags.get(tag.to_ascii_lowercase().as_str()).copied()
    }

    /// Returns the number of overridden tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns true if no tags are overridden.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
