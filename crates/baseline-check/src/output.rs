//! Output formatting.

use crate::cli::OutputFormat;
use baseline_scanner::{IssueStatus, ScanIssue};
use camino::Utf8Path;
use serde::Serialize;
use source_map::LineIndex;

/// How an issue is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    /// Deprecated features are errors; features that are not yet Baseline are warnings.
    pub fn of(status: IssueStatus) -> Self {
        match status {
            IssueStatus::Deprecated => Severity::Error,
            IssueStatus::NotBaseline => Severity::Warning,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
        }
    }

    fn machine_label(self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
        }
    }
}

/// A formatted issue for JSON output.
#[derive(Debug, Serialize)]
pub struct FormattedIssue {
    /// The severity (Error or Warning).
    #[serde(rename = "type")]
    pub issue_type: String,
    /// The file path.
    pub filename: String,
    /// The start position.
    pub start: Position,
    /// The end position.
    pub end: Position,
    /// The message.
    pub message: String,
    /// The feature id.
    pub code: String,
    /// The Baseline status.
    pub status: IssueStatus,
}

/// A position in the source.
#[derive(Debug, Serialize)]
pub struct Position {
    /// 1-indexed line number.
    pub line: u32,
    /// 1-indexed column number.
    pub column: u32,
    /// Byte offset.
    pub offset: u32,
}

/// Formats issues for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the issues of one file.
    pub fn format(&self, issues: &[ScanIssue], file_path: &Utf8Path, source: &str) -> String {
        match self.format {
            OutputFormat::Human => self.format_human(issues, file_path),
            OutputFormat::HumanVerbose => self.format_human_verbose(issues, file_path, source),
            OutputFormat::Json => self.format_json(issues, file_path),
            OutputFormat::Machine => self.format_machine(issues, file_path),
        }
    }

    fn format_human(&self, issues: &[ScanIssue], file_path: &Utf8Path) -> String {
        let mut output = String::new();

        for issue in issues {
            output.push_str(&format!(
                "{}:{}:{}\n{}: {} ({})\n\n",
                file_path,
                issue.range.line + 1,
                issue.range.start_column + 1,
                Severity::of(issue.status).label(),
                issue.message,
                issue.feature_id
            ));
        }

        output
    }

    fn format_human_verbose(
        &self,
        issues: &[ScanIssue],
        file_path: &Utf8Path,
        source: &str,
    ) -> String {
        let line_index = LineIndex::new(source);
        let mut output = String::new();

        for issue in issues {
            let range = issue.range;
            output.push_str(&format!(
                "{}:{}:{}\n{}: {} ({})\n",
                file_path,
                range.line + 1,
                range.start_column + 1,
                Severity::of(issue.status).label(),
                issue.message,
                issue.feature_id
            ));

            let line_text = line_index
                .line_start(range.line)
                .zip(line_index.line_end(range.line))
                .and_then(|(start, end)| source.get(usize::from(start)..usize::from(end)));
            if let Some(line_text) = line_text {
                let line_text = line_text.trim_end_matches('\r');
                let number = (range.line + 1).to_string();
                let width = (range.end_column - range.start_column).max(1) as usize;
                output.push_str(&format!("  {} | {}\n", number, line_text));
                output.push_str(&format!(
                    "  {} | {}{}\n",
                    " ".repeat(number.len()),
                    " ".repeat(range.start_column as usize),
                    "^".repeat(width)
                ));
            }

            output.push('\n');
        }

        output
    }

    fn format_json(&self, issues: &[ScanIssue], file_path: &Utf8Path) -> String {
        let formatted = Self::format_json_issues(issues, file_path);
        serde_json::to_string_pretty(&formatted).unwrap_or_default()
    }

    /// Formats issues into JSON-ready structs.
    pub fn format_json_issues(issues: &[ScanIssue], file_path: &Utf8Path) -> Vec<FormattedIssue> {
        issues
            .iter()
            .map(|issue| FormattedIssue {
                issue_type: Severity::of(issue.status).label().to_string(),
                filename: file_path.to_string(),
                start: Position {
                    line: issue.range.line + 1,
                    column: issue.range.start_column + 1,
                    offset: u32::from(issue.span.start),
                },
                end: Position {
                    line: issue.range.line + 1,
                    column: issue.range.end_column + 1,
                    offset: u32::from(issue.span.end),
                },
                message: issue.message.clone(),
                code: issue.feature_id.to_string(),
                status: issue.status,
            })
            .collect()
    }

    fn format_machine(&self, issues: &[ScanIssue], file_path: &Utf8Path) -> String {
        let mut output = String::new();

        for issue in issues {
            let range = issue.range;
            output.push_str(&format!(
                "{} {}:{}:{}:{}:{} {} ({})\n",
                Severity::of(issue.status).machine_label(),
                file_path,
                range.line + 1,
                range.start_column + 1,
                range.line + 1,
                range.end_column + 1,
                issue.message,
                issue.feature_id
            ));
        }

        output
    }
}

/// Summary of a check run.
#[derive(Debug, Default)]
pub struct CheckSummary {
    /// Number of files checked.
    pub file_count: usize,
    /// Number of errors.
    pub error_count: usize,
    /// Number of warnings.
    pub warning_count: usize,
    /// Whether to fail on warnings.
    pub fail_on_warnings: bool,
}

impl CheckSummary {
    /// Returns true if the run should exit with a failure status.
    pub fn failed(&self) -> bool {
        self.error_count > 0 || (self.warning_count > 0 && self.fail_on_warnings)
    }

    /// Formats the summary line.
    pub fn format(&self) -> String {
        format!(
            "====================================\nbaseline-check found {} and {} in {}",
            plural(self.error_count, "error"),
            plural(self.warning_count, "warning"),
            plural(self.file_count, "file")
        )
    }
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use baseline_scanner::issue_message;
    use pretty_assertions::assert_eq;
    use source_map::{LineRange, Span};

    const SOURCE: &str = "<p>\n  <marquee>Hi</marquee>\n</p>";

    fn marquee() -> ScanIssue {
        ScanIssue {
            range: LineRange::new(1, 3, 10),
            span: Span::from_usize(7, 14),
            feature_id: "html.elements.marquee".into(),
            status: IssueStatus::Deprecated,
            token: "marquee".to_string(),
            message: issue_message("marquee", IssueStatus::Deprecated),
        }
    }

    fn text_box() -> ScanIssue {
        ScanIssue {
            range: LineRange::new(0, 5, 13),
            span: Span::from_usize(5, 13),
            feature_id: "text-box".into(),
            status: IssueStatus::NotBaseline,
            token: "text-box".to_string(),
            message: issue_message("text-box", IssueStatus::NotBaseline),
        }
    }

    #[test]
    fn test_format_human() {
        let output = Formatter::new(OutputFormat::Human).format(
            &[marquee()],
            Utf8Path::new("index.html"),
            SOURCE,
        );
        insta::assert_snapshot!(output.trim_end(), @r#"
        index.html:2:4
        Error: Feature "marquee" is deprecated in Baseline (html.elements.marquee)
        "#);
    }

    #[test]
    fn test_format_human_verbose() {
        let output = Formatter::new(OutputFormat::HumanVerbose).format(
            &[marquee()],
            Utf8Path::new("index.html"),
            SOURCE,
        );
        assert_eq!(
            output,
            "index.html:2:4\n\
             Error: Feature \"marquee\" is deprecated in Baseline (html.elements.marquee)\n\
             \x20 2 |   <marquee>Hi</marquee>\n\
             \x20   |    ^^^^^^^\n\n"
        );
    }

    #[test]
    fn test_format_machine() {
        let output = Formatter::new(OutputFormat::Machine).format(
            &[text_box()],
            Utf8Path::new("a.css"),
            ".a { text-box: trim; }",
        );
        assert_eq!(
            output,
            "WARNING a.css:1:6:1:14 Feature \"text-box\" is not-baseline in Baseline (text-box)\n"
        );
    }

    #[test]
    fn test_format_json() {
        let issues = Formatter::format_json_issues(&[marquee()], Utf8Path::new("index.html"));
        let json = serde_json::to_value(&issues).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "type": "Error",
                "filename": "index.html",
                "start": { "line": 2, "column": 4, "offset": 7 },
                "end": { "line": 2, "column": 11, "offset": 14 },
                "message": "Feature \"marquee\" is deprecated in Baseline",
                "code": "html.elements.marquee",
                "status": "deprecated"
            }])
        );
    }

    #[test]
    fn test_severity_mapping() {
        assert_eq!(Severity::of(IssueStatus::Deprecated), Severity::Error);
        assert_eq!(Severity::of(IssueStatus::NotBaseline), Severity::Warning);
    }

    #[test]
    fn test_summary() {
        let summary = CheckSummary {
            file_count: 1,
            error_count: 2,
            warning_count: 0,
            fail_on_warnings: false,
        };
        assert_eq!(
            summary.format().lines().last(),
            Some("baseline-check found 2 errors and 0 warnings in 1 file")
        );
        assert!(summary.failed());
    }

    #[test]
    fn test_warnings_fail_only_when_requested() {
        let mut summary = CheckSummary {
            file_count: 3,
            error_count: 0,
            warning_count: 1,
            fail_on_warnings: false,
        };
        assert!(!summary.failed());

        summary.fail_on_warnings = true;
        assert!(summary.failed());
    }
}
