//! Record validation
//!
//! Keeps the high-school rows whose cells are usable for a comparison mode.
//! Rows with a marker in any required cell are dropped; a required cell that
//! is neither a marker nor a non-negative integer aborts the run.

use log::debug;

use crate::error::{Result, SegregationError};
use crate::models::{
    CellParse, ComparisonMode, CountCell, DemographicCategory, RawSchoolRow, SchoolRecord,
};
use crate::models::school::HIGH_SCHOOL_LEVEL;

/// Why a raw row was left out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    /// School level is not "High"
    NotHighSchool,
    /// District identifier is a marker or empty
    MissingDistrictId,
    /// A required count cell holds a marker
    MarkerCount(DemographicCategory),
}

/// Validated records plus exclusion counts
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Records that passed, in input order
    pub records: Vec<SchoolRecord>,
    /// Rows that were not high schools
    pub not_high_school: usize,
    /// High-school rows without a usable district identifier
    pub missing_district_id: usize,
    /// High-school rows with a marker in a required count
    pub marker_excluded: usize,
}

impl ValidationReport {
    /// Total number of rows seen
    #[must_use]
    pub fn rows_seen(&self) -> usize {
        self.records.len() + self.excluded()
    }

    /// Number of rows dropped for any reason
    #[must_use]
    pub fn excluded(&self) -> usize {
        self.not_high_school + self.missing_district_id + self.marker_excluded
    }

    fn record_exclusion(&mut self, exclusion: Exclusion) {
        match exclusion {
            Exclusion::NotHighSchool => self.not_high_school += 1,
            Exclusion::MissingDistrictId => self.missing_district_id += 1,
            Exclusion::MarkerCount(_) => self.marker_excluded += 1,
        }
    }
}

/// Filter raw rows down to the records usable for `mode`
///
/// # Errors
/// Returns [`SegregationError::DataIntegrity`] for the first required cell
/// that cannot be parsed as a count.
pub fn validate_records(rows: &[RawSchoolRow], mode: ComparisonMode) -> Result<Vec<SchoolRecord>> {
    validate_records_with_report(rows, mode).map(|report| report.records)
}

/// Like [`validate_records`], also counting why rows were dropped
pub fn validate_records_with_report(
    rows: &[RawSchoolRow],
    mode: ComparisonMode,
) -> Result<ValidationReport> {
    let required = mode.required_categories();
    let mut report = ValidationReport::default();

    for (index, row) in rows.iter().enumerate() {
        match validate_row(index + 1, row, &required)? {
            Ok(record) => report.records.push(record),
            Err(exclusion) => {
                debug!("Row {} excluded: {exclusion:?}", index + 1);
                report.record_exclusion(exclusion);
            }
        }
    }

    Ok(report)
}

/// Validate a single row against the required categories
///
/// The outer `Result` carries fatal data errors, the inner one the
/// keep/exclude decision.
pub fn validate_row(
    row_number: usize,
    row: &RawSchoolRow,
    required: &[DemographicCategory],
) -> Result<std::result::Result<SchoolRecord, Exclusion>> {
    if row.school_level.trim() != HIGH_SCHOOL_LEVEL {
        return Ok(Err(Exclusion::NotHighSchool));
    }

    if row.district_id.trim().is_empty() || CountCell::marker(&row.district_id).is_some() {
        return Ok(Err(Exclusion::MissingDistrictId));
    }

    // Markers exclude the row before any parsing is attempted
    if let Some(category) = required
        .iter()
        .copied()
        .find(|c| CountCell::marker(row.raw_count(*c)).is_some())
    {
        return Ok(Err(Exclusion::MarkerCount(category)));
    }

    let mut record = SchoolRecord::new(
        row.district_id.trim(),
        row.district_name.trim(),
        row.state_name.trim(),
    );

    for category in DemographicCategory::ALL {
        let raw = row.raw_count(category);
        let cell = if required.contains(&category) {
            match CountCell::parse(raw) {
                CellParse::Cell(cell) => cell,
                CellParse::Malformed => {
                    return Err(SegregationError::DataIntegrity {
                        row: row_number,
                        column: category.label().to_string(),
                        value: raw.to_string(),
                    });
                }
            }
        } else {
            CountCell::parse_lenient(raw)
        };
        record = record.with_cell(category, cell);
    }

    Ok(Ok(record))
}
