//! Per-school rows, before and after validation

use serde::{Deserialize, Serialize};

use crate::models::cell::CountCell;
use crate::models::selectors::DemographicCategory;

/// School level value required for a school to be included
pub const HIGH_SCHOOL_LEVEL: &str = "High";

/// A school row exactly as read from the input table
///
/// Every field is kept as text so the validator sees marker glyphs and
/// malformed numbers unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSchoolRow {
    pub district_id: String,
    pub school_level: String,
    pub district_name: String,
    pub state_name: String,
    pub hispanic: String,
    pub white: String,
    pub asian: String,
    pub black: String,
    pub total: String,
}

impl RawSchoolRow {
    /// Raw text of a demographic count cell
    #[must_use]
    pub fn raw_count(&self, category: DemographicCategory) -> &str {
        match category {
            DemographicCategory::Hispanic => &self.hispanic,
            DemographicCategory::White => &self.white,
            DemographicCategory::Asian => &self.asian,
            DemographicCategory::Black => &self.black,
            DemographicCategory::TotalEnrollment => &self.total,
        }
    }
}

/// A validated high-school record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolRecord {
    district_id: String,
    school_level: String,
    district_name: String,
    state_name: String,
    counts: [CountCell; 5],
}

impl SchoolRecord {
    /// Create a high-school record with every count missing
    pub fn new(
        district_id: impl Into<String>,
        district_name: impl Into<String>,
        state_name: impl Into<String>,
    ) -> Self {
        Self {
            district_id: district_id.into(),
            school_level: HIGH_SCHOOL_LEVEL.to_string(),
            district_name: district_name.into(),
            state_name: state_name.into(),
            counts: [CountCell::Missing; 5],
        }
    }

    /// Set one category cell
    #[must_use]
    pub fn with_cell(mut self, category: DemographicCategory, cell: CountCell) -> Self {
        self.counts[category.index()] = cell;
        self
    }

    /// Set one category to a valid count
    #[must_use]
    pub fn with_count(self, category: DemographicCategory, count: u64) -> Self {
        self.with_cell(category, CountCell::Count(count))
    }

    #[must_use]
    pub fn district_id(&self) -> &str {
        &self.district_id
    }

    #[must_use]
    pub fn school_level(&self) -> &str {
        &self.school_level
    }

    #[must_use]
    pub fn district_name(&self) -> &str {
        &self.district_name
    }

    #[must_use]
    pub fn state_name(&self) -> &str {
        &self.state_name
    }

    /// The cell stored for a category
    #[must_use]
    pub fn cell(&self, category: DemographicCategory) -> CountCell {
        self.counts[category.index()]
    }

    /// The count for a category, if valid
    #[must_use]
    pub fn count(&self, category: DemographicCategory) -> Option<u64> {
        self.cell(category).count()
    }

    /// Total enrollment, treating a missing total as zero
    ///
    /// Validated records always carry a total.
    #[must_use]
    pub fn total_enrollment(&self) -> u64 {
        self.count(DemographicCategory::TotalEnrollment)
            .unwrap_or_default()
    }
}
