//! Source position tracking for baseline-check.
//!
//! This crate converts byte offsets into line/column coordinates and
//! translates offsets found inside embedded text (such as the body of a
//! `<style>` element) back into the coordinate space of the outer document.

mod line_index;
mod region;
mod span;

pub use line_index::{lines_with_offsets, LineCol, LineIndex, LineRange};
pub use region::EmbeddedRegion;
pub use span::{ByteOffset, Span};
