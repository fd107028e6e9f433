//! HTML element and attribute matching.
//!
//! Tags are found line by line; attributes are scanned only between the tag
//! name and the next `>` on the same line, so a tag whose attributes continue
//! on the following lines is only partially checked. `<style>` bodies are
//! handed to the CSS matcher first.

use crate::candidate::Candidate;
use crate::css::match_css;
use regex::Regex;
use smol_str::format_smolstr;
use source_map::{lines_with_offsets, EmbeddedRegion, Span};
use std::sync::LazyLock;
use web_features::{FeatureIndex, TagOverrides};

static STYLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style\b[^>]*>(.*?)</style\s*>").unwrap());

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9-]*)").unwrap());

static ATTRIBUTE_WITH_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|((?:[^\s"'=<>`/]|/[^\s"'=<>`])+))"#,
    )
    .unwrap()
});

static ATTRIBUTE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z_:][-A-Za-z0-9_:.]*").unwrap());

/// Matches HTML constructs in `text`, which starts at `region` in the outer
/// document, including CSS inside `<style>` elements.
pub(crate) fn match_html<'i>(
    text: &str,
    region: EmbeddedRegion,
    index: &'i FeatureIndex,
    overrides: &TagOverrides,
    out: &mut Vec<Candidate<'i>>,
) {
    for block in STYLE_BLOCK.captures_iter(text) {
        if let Some(body) = block.get(1) {
            match_css(body.as_str(), region.nested(body.start()), index, out);
        }
    }

    for (line_start, line) in lines_with_offsets(text) {
        for caps in TAG.captures_iter(line) {
            let (Some(slash), Some(name)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            if !slash.is_empty() {
                continue;
            }

            let tag = name.as_str();
            let local = Span::from_usize(line_start + name.start(), line_start + name.end());
            let span = region.to_outer(local);
            if let Some(id) = index.tag(tag) {
                out.push(Candidate::feature(tag, id, span));
            } else if let Some(status) = overrides.get(tag) {
                let feature_id = format_smolstr!("html.elements.{}", tag.to_ascii_lowercase());
                out.push(Candidate::fixed(tag, feature_id, status, span));
            }

            let rest = &line[name.end()..];
            let attrs_end = rest.find('>').unwrap_or(rest.len());
            match_attributes(
                tag,
                &rest[..attrs_end],
                region.nested(line_start + name.end()),
                index,
                out,
            );
        }
    }
}

/// Matches the attributes of one tag; `attrs` starts at `region`.
fn match_attributes<'i>(
    tag: &str,
    attrs: &str,
    region: EmbeddedRegion,
    index: &'i FeatureIndex,
    out: &mut Vec<Candidate<'i>>,
) {
    // Bare attributes are searched in a copy with `name=value` pairs blanked out.
    let mut bare = attrs.to_string();

    for caps in ATTRIBUTE_WITH_VALUE.captures_iter(attrs) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        bare.replace_range(whole.range(), &" ".repeat(whole.len()));

        let attr = name.as_str();
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map_or("", |m| m.as_str());
        let name_span = region.to_outer(Span::from_usize(name.start(), name.end()));

        if let Some(id) = index.tag_attr_value(tag, attr, value) {
            let span = region.to_outer(Span::from_usize(whole.start(), whole.end()));
            out.push(Candidate::feature(
                format!("{tag}[{attr}=\"{value}\"]"),
                id,
                span,
            ));
        } else if let Some(id) = index.tag_attr(tag, attr) {
            out.push(Candidate::feature(format!("{tag}[{attr}]"), id, name_span));
        } else if let Some(id) = index.global_attr(attr) {
            out.push(Candidate::feature(format!("[{attr}]"), id, name_span));
        }
    }

    for name in ATTRIBUTE_NAME.find_iter(&bare) {
        if bare[name.end()..].trim_start().starts_with('=') {
            continue;
        }

        let attr = name.as_str();
        let span = region.to_outer(Span::from_usize(name.start(), name.end()));
        if let Some(id) = index.tag_attr(tag, attr) {
            out.push(Candidate::feature(format!("{tag}[{attr}]"), id, span));
        } else if let Some(id) = index.global_attr(attr) {
            out.push(Candidate::feature(format!("[{attr}]"), id, span));
        }
    }
}
