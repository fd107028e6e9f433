//! Translation of offsets found in embedded text back to the outer document.

use crate::{ByteOffset, Span};
use text_size::TextSize;

/// A region of embedded text inside a larger document.
///
/// Matchers that run over the embedded text produce spans relative to the
/// region's first byte; [`EmbeddedRegion::to_outer`] moves them into the
/// coordinate space of the outermost document. Regions nest: a region found
/// inside another region's text is created with [`EmbeddedRegion::nested`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmbeddedRegion {
    base: ByteOffset,
}

impl EmbeddedRegion {
    /// The region covering a whole document.
    #[inline]
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a region for text starting at `local_start` within this region.
    #[inline]
    pub fn nested(&self, local_start: usize) -> EmbeddedRegion {
        EmbeddedRegion {
            base: self.base + TextSize::from(local_start as u32),
        }
    }

    /// Translates a region-local span into outer document coordinates.
    #[inline]
    pub fn to_outer(&self, local: Span) -> Span {
        local.shift(self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_identity() {
        let span = Span::from_usize(4, 9);
        assert_eq!(EmbeddedRegion::root().to_outer(span), span);
    }

    #[test]
    fn test_translation() {
        let region = EmbeddedRegion::root().nested(20);
        assert_eq!(
            region.to_outer(Span::from_usize(3, 7)),
            Span::from_usize(23, 27)
        );
    }

    #[test]
    fn test_nested_regions_compose() {
        let outer = EmbeddedRegion::root().nested(100);
        let inner = outer.nested(15);
        assert_eq!(
            inner.to_outer(Span::from_usize(0, 4)),
            Span::from_usize(115, 119)
        );
    }
}
