//! Content flow: the measurable source the paginator divides into pages
//!
//! The paginator never looks at content directly. It asks a
//! [`ContentFlow`] how much of a range fits into a content box and where
//! a page may legally end, and keeps only [`ContentRange`] offsets.

mod text;

pub use text::TextFlow;

use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Half-open span `[start, end)` of content units owned by a flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContentRange {
    pub start: usize,
    pub end: usize,
}

impl ContentRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "range start past end");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Split into `[start, offset)` and `[offset, end)`.
    ///
    /// `offset` is clamped into the range.
    pub fn split_at(&self, offset: usize) -> (ContentRange, ContentRange) {
        let mid = offset.clamp(self.start, self.end);
        (
            ContentRange::new(self.start, mid),
            ContentRange::new(mid, self.end),
        )
    }
}

/// Answer to "how much of this range fits"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    /// Leading part of the range that fits
    pub consumed: ContentRange,
    /// What is left, if anything
    pub remainder: Option<ContentRange>,
}

impl Measurement {
    /// Build a measurement that fits everything up to `fit_end`
    pub fn fitting(range: ContentRange, fit_end: usize) -> Self {
        let (consumed, rest) = range.split_at(fit_end);
        Self {
            consumed,
            remainder: (!rest.is_empty()).then_some(rest),
        }
    }
}

/// Measurement capability supplied by the caller.
///
/// Implementations must be deterministic: the same range and height
/// always give the same answer.
pub trait ContentFlow {
    /// The whole source, or [`PaginationError::ContentUnavailable`]
    fn source(&self) -> Result<ContentRange>;

    /// How much of `range` fits in `available_height` points
    fn measure(&self, range: ContentRange, available_height: f32) -> Measurement;

    /// Offsets inside `range` where a page may end, ascending.
    ///
    /// A candidate `c` splits the range into `[start, c)` and `[c, end)`.
    fn break_points(&self, range: ContentRange) -> Vec<usize>;

    /// Tag of the block containing `offset` (e.g. `"h1"`, `"p"`)
    fn block_tag(&self, _offset: usize) -> Option<&str> {
        None
    }

    /// Extent of the block containing `offset`
    fn block_extent(&self, _offset: usize) -> Option<ContentRange> {
        None
    }
}

impl<T: ContentFlow + ?Sized> ContentFlow for &T {
    fn source(&self) -> Result<ContentRange> {
        (**self).source()
    }

    fn measure(&self, range: ContentRange, available_height: f32) -> Measurement {
        (**self).measure(range, available_height)
    }

    fn break_points(&self, range: ContentRange) -> Vec<usize> {
        (**self).break_points(range)
    }

    fn block_tag(&self, offset: usize) -> Option<&str> {
        (**self).block_tag(offset)
    }

    fn block_extent(&self, offset: usize) -> Option<ContentRange> {
        (**self).block_extent(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_at_clamps() {
        let range = ContentRange::new(4, 10);
        assert_eq!(
            range.split_at(7),
            (ContentRange::new(4, 7), ContentRange::new(7, 10))
        );
        assert_eq!(range.split_at(20).1, ContentRange::new(10, 10));
        assert_eq!(range.split_at(0).0, ContentRange::new(4, 4));
    }

    #[test]
    fn test_measurement_fitting() {
        let range = ContentRange::new(0, 5);
        let all = Measurement::fitting(range, 5);
        assert_eq!(all.remainder, None);

        let part = Measurement::fitting(range, 3);
        assert_eq!(part.consumed, ContentRange::new(0, 3));
        assert_eq!(part.remainder, Some(ContentRange::new(3, 5)));
    }
}
