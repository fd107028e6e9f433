//! End-to-end scans against the bundled feature data.

use baseline_scanner::{IssueStatus, LanguageKind, ScanIssue, ScanOptions, Scanner};
use pretty_assertions::assert_eq;
use source_map::LineRange;
use web_features::{FeatureDatabase, FeatureIndex};

struct Fixture {
    db: FeatureDatabase,
    index: FeatureIndex,
}

impl Fixture {
    fn bundled() -> Self {
        let db = FeatureDatabase::bundled().expect("bundled dataset loads");
        let index = FeatureIndex::build(&db);
        Self { db, index }
    }

    fn scan(&self, text: &str, language: LanguageKind) -> Vec<ScanIssue> {
        self.scan_with(text, language, &ScanOptions::default())
    }

    fn scan_with(
        &self,
        text: &str,
        language: LanguageKind,
        options: &ScanOptions,
    ) -> Vec<ScanIssue> {
        Scanner::new(&self.db, &self.index)
            .scan(text, language, options)
            .issues
    }
}

fn report(issues: &[ScanIssue]) -> String {
    issues
        .iter()
        .map(|issue| {
            format!(
                "{}:{}-{} {} {} {}",
                issue.range.line,
                issue.range.start_column,
                issue.range.end_column,
                issue.status,
                issue.feature_id,
                issue.message
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn obsolete_element_is_deprecated() {
    let fixture = Fixture::bundled();
    let issues = fixture.scan("<marquee>Hi</marquee>", LanguageKind::Html);

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].range, LineRange::new(0, 1, 8));
    assert_eq!(issues[0].feature_id, "html.elements.marquee");
    assert_eq!(issues[0].status, IssueStatus::Deprecated);
    assert_eq!(
        issues[0].message,
        "Feature \"marquee\" is deprecated in Baseline"
    );
}

#[test]
fn limited_css_property_is_reported() {
    let fixture = Fixture::bundled();
    let issues = fixture.scan(".a { text-box: trim; }", LanguageKind::Css);

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].range, LineRange::new(0, 5, 13));
    assert_eq!(issues[0].feature_id, "text-box");
    assert_eq!(issues[0].status, IssueStatus::NotBaseline);
}

#[test]
fn attribute_known_only_to_scripting_is_not_reported() {
    let fixture = Fixture::bundled();
    let issues = fixture.scan(r#"<dialog closedby="any">"#, LanguageKind::Html);
    assert!(issues.is_empty(), "{issues:?}");
}

#[test]
fn caller_supplied_deprecated_tag() {
    let fixture = Fixture::bundled();
    let options = ScanOptions::default().with_deprecated_tag("custom-tag");

    let issues = fixture.scan_with("<custom-tag></custom-tag>", LanguageKind::Html, &options);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].feature_id, "html.elements.custom-tag");
    assert_eq!(issues[0].status, IssueStatus::Deprecated);

    let without = fixture.scan("<custom-tag></custom-tag>", LanguageKind::Html);
    assert!(without.is_empty());
}

#[test]
fn discouraged_feature_is_deprecated_even_when_widely_available() {
    let fixture = Fixture::bundled();
    let issues = fixture.scan("a { clip: rect(0 0 0 0); }", LanguageKind::Css);

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].range, LineRange::new(0, 4, 8));
    assert_eq!(issues[0].feature_id, "clip");
    assert_eq!(issues[0].status, IssueStatus::Deprecated);
}

#[test]
fn baseline_features_are_silent() {
    let fixture = Fixture::bundled();
    let text = "<dialog open>\n  <img loading=\"lazy\" popover>\n</dialog>";
    assert!(fixture.scan(text, LanguageKind::Html).is_empty());
    assert!(fixture
        .scan("@container (width > 40em) { .a { zoom: 2; } }", LanguageKind::Css)
        .is_empty());
}

#[test]
fn repeated_scans_agree() {
    let fixture = Fixture::bundled();
    let text = "<div writingsuggestions>\n<style>a { field-sizing: content; }</style>";

    let first = fixture.scan(text, LanguageKind::Html);
    let second = fixture.scan(text, LanguageKind::Html);
    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
}

#[test]
fn style_block_positions_map_to_the_document() {
    let fixture = Fixture::bundled();
    let text = [
        "<!doctype html>",
        "<html>",
        "<head>",
        "<meta charset=\"utf-8\">",
        "<title>Demo</title>",
        "<style>",
        ".card {",
        "  text-box: trim;",
        "}",
        "</style>",
    ]
    .join("\n");

    // The style body starts on line 5; its third line is line 7 of the document.
    let issues = fixture.scan(&text, LanguageKind::Html);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].range, LineRange::new(7, 2, 10));
    assert_eq!(issues[0].token, "text-box");
}

#[test]
fn nested_scss_rules() {
    let fixture = Fixture::bundled();
    let text = ".a {\n  &:hover { field-sizing: content; }\n}";

    let issues = fixture.scan(text, LanguageKind::Scss);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].range, LineRange::new(1, 12, 24));
}

#[test]
fn mixed_document_report() {
    let fixture = Fixture::bundled();
    let text = [
        r#"<div popover="auto" writingsuggestions>"#,
        r#"  <button command="show-modal" commandfor="dlg">Open</button>"#,
        "  <center>Old</center>",
        "<style>.x { field-sizing: content; }</style>",
        "</div>",
    ]
    .join("\n");

    let issues = fixture.scan(&text, LanguageKind::Html);
    insta::assert_snapshot!(report(&issues), @r#"
    0:20-38 not-baseline writingsuggestions Feature "[writingsuggestions]" is not-baseline in Baseline
    1:10-17 not-baseline invoker-commands Feature "button[command]" is not-baseline in Baseline
    1:31-41 not-baseline invoker-commands Feature "button[commandfor]" is not-baseline in Baseline
    2:3-9 deprecated html.elements.center Feature "center" is deprecated in Baseline
    3:12-24 not-baseline field-sizing Feature "field-sizing" is not-baseline in Baseline
    "#);
}

#[test]
fn columns_count_characters_after_multibyte_text() {
    let fixture = Fixture::bundled();
    let issues = fixture.scan("<p>héllo wörld</p><marquee>x</marquee>", LanguageKind::Html);

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].range, LineRange::new(0, 19, 26));
}

#[test]
fn style_block_columns_count_characters() {
    let fixture = Fixture::bundled();
    let text = "<p>ünïcode</p>\n<style>/* größe */ .a { text-box: trim; }</style>";

    let issues = fixture.scan(text, LanguageKind::Html);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].range, LineRange::new(1, 24, 32));
    assert_eq!(issues[0].token, "text-box");
}
