//! CSS property and at-rule matching.
//!
//! Works line by line over CSS, SCSS or LESS text. A property is an
//! identifier at the start of a line or after whitespace, `{` or `;`,
//! immediately followed by `:`. An at-rule is `@` followed by an identifier.
//! Identifiers without a lookup entry are dropped.

use crate::candidate::Candidate;
use regex::Regex;
use source_map::{lines_with_offsets, EmbeddedRegion, Span};
use std::sync::LazyLock;
use web_features::FeatureIndex;

static PROPERTY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[\s{;])(-?[A-Za-z_][-A-Za-z0-9_]*):").unwrap());

static AT_RULE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@[A-Za-z][-A-Za-z0-9]*").unwrap());

/// Matches CSS constructs in `text`, which starts at `region` in the outer document.
pub(crate) fn match_css<'i>(
    text: &str,
    region: EmbeddedRegion,
    index: &'i FeatureIndex,
    out: &mut Vec<Candidate<'i>>,
) {
    for (line_start, line) in lines_with_offsets(text) {
        for caps in PROPERTY.captures_iter(line) {
            let Some(name) = caps.get(1) else { continue };
            if let Some(id) = index.css(name.as_str()) {
                let local = Span::from_usize(line_start + name.start(), line_start + name.end());
                out.push(Candidate::feature(name.as_str(), id, region.to_outer(local)));
            }
        }

        for at_rule in AT_RULE.find_iter(line) {
            if let Some(id) = index.css(at_rule.as_str()) {
                let local =
                    Span::from_usize(line_start + at_rule.start(), line_start + at_rule.end());
                out.push(Candidate::feature(at_rule.as_str(), id, region.to_outer(local)));
            }
        }
    }
}
