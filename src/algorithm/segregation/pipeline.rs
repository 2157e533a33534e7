//! End-to-end ranking run
//!
//! Chains validation, grouping and ranking for one comparison mode and size
//! threshold. The run either yields the complete ranking or an error.

use std::fmt;
use std::time::Instant;

use log::info;

use crate::algorithm::segregation::grouping::group_by_district;
use crate::algorithm::segregation::ranking::{EligibilityCriteria, rank_districts_with_report};
use crate::algorithm::segregation::validation::validate_records_with_report;
use crate::error::Result;
use crate::models::{ComparisonMode, RankedDistricts, RawSchoolRow, SizeThreshold};

/// Counts collected while running the pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub rows_not_high_school: usize,
    pub rows_missing_district_id: usize,
    pub rows_marker_excluded: usize,
    pub districts_grouped: usize,
    pub districts_too_few_schools: usize,
    pub districts_below_minimum_enrollment: usize,
    pub districts_not_computable: usize,
    pub districts_ranked: usize,
}

impl fmt::Display for PipelineStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pipeline Statistics:")?;
        writeln!(f, "  Rows Read: {}", self.rows_read)?;
        writeln!(f, "  Rows Kept: {}", self.rows_kept)?;
        writeln!(f, "    Not High School: {}", self.rows_not_high_school)?;
        writeln!(f, "    Missing District ID: {}", self.rows_missing_district_id)?;
        writeln!(f, "    Marker In Required Count: {}", self.rows_marker_excluded)?;
        writeln!(f, "  Districts Grouped: {}", self.districts_grouped)?;
        writeln!(f, "    Too Few Schools: {}", self.districts_too_few_schools)?;
        writeln!(
            f,
            "    Below Minimum Enrollment: {}",
            self.districts_below_minimum_enrollment
        )?;
        writeln!(f, "    Not Computable: {}", self.districts_not_computable)?;
        writeln!(f, "  Districts Ranked: {}", self.districts_ranked)
    }
}

/// The ranking produced by a run and how it was reached
#[derive(Debug, Clone)]
pub struct RankingOutcome {
    pub ranked: RankedDistricts,
    pub stats: PipelineStats,
}

/// A configured ranking run
#[derive(Debug, Clone, Copy)]
pub struct SegregationPipeline {
    mode: ComparisonMode,
    criteria: EligibilityCriteria,
}

impl SegregationPipeline {
    /// Create a pipeline for a comparison mode and size threshold
    #[must_use]
    pub fn new(mode: ComparisonMode, threshold: SizeThreshold) -> Self {
        Self {
            mode,
            criteria: EligibilityCriteria::from(threshold),
        }
    }

    /// Replace the eligibility criteria derived from the size threshold
    #[must_use]
    pub fn with_criteria(mut self, criteria: EligibilityCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    #[must_use]
    pub fn mode(&self) -> ComparisonMode {
        self.mode
    }

    #[must_use]
    pub fn criteria(&self) -> &EligibilityCriteria {
        &self.criteria
    }

    /// Run validation, grouping and ranking over raw rows
    ///
    /// # Errors
    /// Fails on the first malformed required count; no partial ranking is
    /// returned.
    pub fn run(&self, rows: &[RawSchoolRow]) -> Result<RankingOutcome> {
        let start = Instant::now();
        info!(
            "Ranking districts by {} (min {} schools, min enrollment {})",
            self.mode, self.criteria.min_schools, self.criteria.min_enrollment
        );

        let validation = validate_records_with_report(rows, self.mode)?;
        let mut stats = PipelineStats {
            rows_read: validation.rows_seen(),
            rows_kept: validation.records.len(),
            rows_not_high_school: validation.not_high_school,
            rows_missing_district_id: validation.missing_district_id,
            rows_marker_excluded: validation.marker_excluded,
            ..PipelineStats::default()
        };
        info!(
            "Validated {} of {} rows",
            stats.rows_kept, stats.rows_read
        );

        let districts = group_by_district(validation.records);
        stats.districts_grouped = districts.len();
        info!("Grouped schools into {} districts", districts.len());

        let report = rank_districts_with_report(&districts, self.mode, &self.criteria);
        stats.districts_too_few_schools = report.too_few_schools;
        stats.districts_below_minimum_enrollment = report.below_minimum_enrollment;
        stats.districts_not_computable = report.not_computable;
        stats.districts_ranked = report.ranked.len();
        info!(
            "Ranked {} districts ({} skipped) in {:?}",
            stats.districts_ranked,
            report.skipped(),
            start.elapsed()
        );

        Ok(RankingOutcome {
            ranked: report.ranked,
            stats,
        })
    }
}
