//! Coordinate types and line helpers shared by every scribe crate.
//!
//! Columns are `char` indices into a line (Unicode scalar values, not
//! grapheme clusters). A `Location` sits *between* characters, so a column
//! equal to the line's char count is the position after the last character.

use std::cmp::Ordering;
use std::fmt;

pub mod column;
pub mod line_ending;

pub use line_ending::{join_lines, normalize_line_endings, split_lines};

/// A position inside a buffer expressed as (row index, char column within that row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Location {
    pub row: usize,
    pub col: usize,
}

impl Location {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub const fn origin() -> Self {
        Self { row: 0, col: 0 }
    }

    /// `(row, col)` tuple, the ordering key for ranges.
    pub const fn coords(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Location reached after inserting `text` at `self`.
    ///
    /// With `n` line breaks in `text` the result is `(row + n, chars(last segment))`;
    /// without any the column simply advances by the text's char count.
    pub fn advanced_by(&self, text: &str) -> Self {
        let breaks = text.matches('\n').count();
        if breaks == 0 {
            return Self::new(self.row, self.col + column::char_len(text));
        }
        let last = text.rsplit('\n').next().unwrap_or("");
        Self::new(self.row + breaks, column::char_len(last))
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> Ordering {
        self.coords().cmp(&other.coords())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

/// A span between two locations.
///
/// Endpoints are stored exactly as given: `start` is the anchor of a selection
/// and may sort after `end`. Consumers call [`LocationRange::normalized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LocationRange {
    pub start: Location,
    pub end: Location,
}

impl LocationRange {
    pub const fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    /// Ordered `(min, max)` endpoints.
    pub fn normalized(&self) -> (Location, Location) {
        if self.start > self.end {
            (self.end, self.start)
        } else {
            (self.start, self.end)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for LocationRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
