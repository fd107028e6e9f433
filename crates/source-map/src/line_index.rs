//! Line index for efficient offset ↔ line/column conversion.

use crate::{ByteOffset, Span};
use text_size::TextSize;

/// A line and column position (0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineCol {
    /// 0-indexed line number.
    pub line: u32,
    /// 0-indexed column, in characters from the start of the line.
    pub col: u32,
}

impl LineCol {
    /// Creates a new line/column position.
    #[inline]
    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

/// A single-line range: one line and a start/end column pair on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct LineRange {
    /// 0-indexed line number.
    pub line: u32,
    /// 0-indexed start column (inclusive).
    pub start_column: u32,
    /// 0-indexed end column (exclusive).
    pub end_column: u32,
}

impl LineRange {
    /// Creates a new line range.
    #[inline]
    pub fn new(line: u32, start_column: u32, end_column: u32) -> Self {
        Self {
            line,
            start_column,
            end_column,
        }
    }
}

/// An index for converting byte offsets into line/column positions.
///
/// The index stores the byte offset of the start of each line, enabling O(log n)
/// line lookups. Columns count characters, so the index also records every
/// multi-byte character to correct the byte distance from the line start.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// `line_starts[i]` is the offset where line `i` begins.
    line_starts: Vec<ByteOffset>,
    /// Offset and UTF-8 length of each non-ASCII character, in text order.
    wide_chars: Vec<(ByteOffset, TextSize)>,
    /// Total length of the indexed text.
    len: ByteOffset,
}

impl LineIndex {
    /// Creates a new line index from source text.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];
        line_starts.extend(
            text.match_indices('\n')
                .map(|(offset, _)| TextSize::from((offset + 1) as u32)),
        );

        let wide_chars = text
            .char_indices()
            .filter(|(_, c)| !c.is_ascii())
            .map(|(offset, c)| (TextSize::from(offset as u32), TextSize::of(c)))
            .collect();

        Self {
            line_starts,
            wide_chars,
            len: TextSize::from(text.len() as u32),
        }
    }

    /// Converts a byte offset to a line/column position.
    ///
    /// Returns `None` if the offset lies past the end of the text.
    pub fn line_col(&self, offset: ByteOffset) -> Option<LineCol> {
        if offset > self.len {
            return None;
        }

        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        };

        let col = self.char_column(self.line_starts[line], offset);
        Some(LineCol::new(line as u32, col))
    }

    /// Counts the characters between `line_start` and `offset`.
    fn char_column(&self, line_start: ByteOffset, offset: ByteOffset) -> u32 {
        let from = self.wide_chars.partition_point(|&(at, _)| at < line_start);
        let to = self.wide_chars.partition_point(|&(at, _)| at < offset);
        let extra: u32 = self.wide_chars[from..to]
            .iter()
            .map(|&(_, len)| u32::from(len) - 1)
            .sum();

        (u32::from(offset) - u32::from(line_start)).saturating_sub(extra)
    }

    /// Returns the byte offset where a line starts.
    pub fn line_start(&self, line: u32) -> Option<ByteOffset> {
        self.line_starts.get(line as usize).copied()
    }

    /// Returns the byte offset where a line ends (before its newline).
    pub fn line_end(&self, line: u32) -> Option<ByteOffset> {
        let line = line as usize;
        if line >= self.line_starts.len() {
            return None;
        }

        Some(
            self.line_starts
                .get(line + 1)
                .map(|&next| next - TextSize::from(1))
                .unwrap_or(self.len),
        )
    }

    /// Converts a span into a range on the span's starting line.
    ///
    /// A span that crosses a line break is clipped to the end of its first line.
    pub fn line_range(&self, span: Span) -> Option<LineRange> {
        let start = self.line_col(span.start)?;
        let end = match self.line_col(span.end) {
            Some(end) if end.line == start.line => end.col,
            _ => {
                let line_end = self.line_end(start.line)?;
                self.char_column(self.line_starts[start.line as usize], line_end)
            }
        };

        Some(LineRange::new(start.line, start.col, end.max(start.col)))
    }
}

/// Iterates the lines of `text` together with the byte offset each line starts at.
///
/// Line text excludes the terminating `\n`; a trailing `\r` is kept so that
/// offsets stay exact.
pub fn lines_with_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    text.split('\n').map(move |line| {
        let start = offset;
        offset += line.len() + 1;
        (start, line)
    })
}
