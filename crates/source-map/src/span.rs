//! Span and byte offset types for source positions.

use text_size::TextSize;

/// A byte offset into a source string.
pub type ByteOffset = TextSize;

/// A half-open byte range `[start, end)` within a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// The start byte offset (inclusive).
    pub start: ByteOffset,
    /// The end byte offset (exclusive).
    pub end: ByteOffset,
}

impl Span {
    /// Creates a new span from start and end byte offsets.
    #[inline]
    pub fn new(start: impl Into<ByteOffset>, end: impl Into<ByteOffset>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Creates a span from `usize` offsets, as produced by `str` and regex APIs.
    #[inline]
    pub fn from_usize(start: usize, end: usize) -> Self {
        Self::new(TextSize::from(start as u32), TextSize::from(end as u32))
    }

    /// Moves both ends of the span forward by `delta` bytes.
    #[inline]
    pub fn shift(self, delta: ByteOffset) -> Span {
        Span {
            start: self.start + delta,
            end: self.end + delta,
        }
    }
}
