//! Raw count cells from the school table
//!
//! The NCES export marks unusable cells with one of three glyphs instead of a
//! number. Each cell is parsed into a [`CountCell`] so that every consumer has
//! to handle the marker cases explicitly.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Glyph marking a cell whose data are not applicable
pub const NOT_APPLICABLE_MARKER: &str = "†";
/// Glyph marking a cell whose data are missing
pub const MISSING_MARKER: &str = "–";
/// Glyph marking a cell whose data do not meet NCES quality standards
pub const QUALITY_EXCLUDED_MARKER: &str = "‡";

/// Largest count accepted from the input; sums are done in `i64`
pub const MAX_COUNT: u64 = i64::MAX as u64;

/// A single count cell: either a usable count or a data-quality marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CountCell {
    /// A valid non-negative count
    Count(u64),
    /// `†` - the data are not applicable
    NotApplicable,
    /// `–` - the data are missing
    Missing,
    /// `‡` - the data do not meet quality standards
    QualityExcluded,
}

/// Outcome of classifying a raw cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellParse {
    /// The cell is a count or a recognised marker
    Cell(CountCell),
    /// The cell is neither a marker nor a non-negative integer
    Malformed,
}

impl CountCell {
    /// Check the raw text for one of the marker glyphs
    ///
    /// An empty cell is not a marker.
    #[must_use]
    pub fn marker(raw: &str) -> Option<Self> {
        match raw.trim() {
            MISSING_MARKER => Some(Self::Missing),
            NOT_APPLICABLE_MARKER => Some(Self::NotApplicable),
            QUALITY_EXCLUDED_MARKER => Some(Self::QualityExcluded),
            _ => None,
        }
    }

    /// Classify the raw text of a cell
    #[must_use]
    pub fn parse(raw: &str) -> CellParse {
        if let Some(marker) = Self::marker(raw) {
            return CellParse::Cell(marker);
        }

        match raw.trim().parse::<u64>() {
            Ok(n) if n <= MAX_COUNT => CellParse::Cell(Self::Count(n)),
            _ => CellParse::Malformed,
        }
    }

    /// Parse a cell, falling back to `Missing` for malformed text
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        match Self::parse(raw) {
            CellParse::Cell(cell) => cell,
            CellParse::Malformed => Self::Missing,
        }
    }

    /// The count, if this cell holds one
    #[must_use]
    pub const fn count(self) -> Option<u64> {
        match self {
            Self::Count(n) => Some(n),
            Self::NotApplicable | Self::Missing | Self::QualityExcluded => None,
        }
    }

    /// Whether this cell holds a usable count
    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Count(_))
    }
}

impl fmt::Display for CountCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::NotApplicable => f.write_str(NOT_APPLICABLE_MARKER),
            Self::Missing => f.write_str(MISSING_MARKER),
            Self::QualityExcluded => f.write_str(QUALITY_EXCLUDED_MARKER),
        }
    }
}
