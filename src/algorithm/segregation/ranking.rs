//! District eligibility and ranking
//!
//! A district is ranked when it has at least two schools, meets the minimum
//! enrollment and has a computable index. Results are ordered by index,
//! highest first; equal indices keep grouping order.

use std::fmt;

use log::debug;

use crate::algorithm::segregation::dissimilarity::dissimilarity_index;
use crate::models::{ComparisonMode, District, DistrictResult, RankedDistricts, SizeThreshold};

/// Fewest schools a district needs to show within-district segregation
pub const MIN_SCHOOLS: usize = 2;

/// Filters a district must pass before its index is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityCriteria {
    /// Minimum number of member schools (inclusive)
    pub min_schools: usize,
    /// Minimum total enrollment (inclusive)
    pub min_enrollment: u64,
}

impl From<SizeThreshold> for EligibilityCriteria {
    fn from(threshold: SizeThreshold) -> Self {
        Self {
            min_schools: MIN_SCHOOLS,
            min_enrollment: threshold.min_enrollment(),
        }
    }
}

/// Why a district was left out of the ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    TooFewSchools,
    BelowMinimumEnrollment,
    NotComputable,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewSchools => write!(f, "fewer than {MIN_SCHOOLS} schools"),
            Self::BelowMinimumEnrollment => f.write_str("below minimum enrollment"),
            Self::NotComputable => f.write_str("index not computable"),
        }
    }
}

/// Ranked districts and skip counts
#[derive(Debug, Clone, Default)]
pub struct RankingReport {
    pub ranked: RankedDistricts,
    pub too_few_schools: usize,
    pub below_minimum_enrollment: usize,
    pub not_computable: usize,
}

impl RankingReport {
    /// Number of districts left out for any reason
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.too_few_schools + self.below_minimum_enrollment + self.not_computable
    }
}

/// Check a district against the criteria and compute its result
pub fn evaluate_district(
    district: &District,
    mode: ComparisonMode,
    criteria: &EligibilityCriteria,
) -> Result<DistrictResult, SkipReason> {
    if district.school_count() < criteria.min_schools {
        return Err(SkipReason::TooFewSchools);
    }

    let total_enrollment = district.total_enrollment();
    if total_enrollment < criteria.min_enrollment {
        return Err(SkipReason::BelowMinimumEnrollment);
    }

    let index = dissimilarity_index(district, mode).ok_or(SkipReason::NotComputable)?;

    Ok(DistrictResult {
        district_name: district.district_name().to_string(),
        district_id: district.district_id().to_string(),
        dissimilarity_index: index,
        state_name: district.state_name().to_string(),
        total_enrollment,
    })
}

/// Rank districts for a comparison mode and size threshold
#[must_use]
pub fn rank_districts(
    districts: &[District],
    mode: ComparisonMode,
    threshold: SizeThreshold,
) -> RankedDistricts {
    rank_districts_with(districts, mode, &EligibilityCriteria::from(threshold))
}

/// Rank districts against explicit eligibility criteria
#[must_use]
pub fn rank_districts_with(
    districts: &[District],
    mode: ComparisonMode,
    criteria: &EligibilityCriteria,
) -> RankedDistricts {
    rank_districts_with_report(districts, mode, criteria).ranked
}

/// Rank districts, also counting why districts were skipped
#[must_use]
pub fn rank_districts_with_report(
    districts: &[District],
    mode: ComparisonMode,
    criteria: &EligibilityCriteria,
) -> RankingReport {
    let mut report = RankingReport::default();
    let mut tagged: Vec<(usize, DistrictResult)> = Vec::new();

    for (sequence, district) in districts.iter().enumerate() {
        match evaluate_district(district, mode, criteria) {
            Ok(result) => tagged.push((sequence, result)),
            Err(reason) => {
                debug!("Skipping district {}: {reason}", district.district_id());
                match reason {
                    SkipReason::TooFewSchools => report.too_few_schools += 1,
                    SkipReason::BelowMinimumEnrollment => report.below_minimum_enrollment += 1,
                    SkipReason::NotComputable => report.not_computable += 1,
                }
            }
        }
    }

    // Ties fall back to the grouping sequence
    tagged.sort_by(|(seq_a, a), (seq_b, b)| {
        b.dissimilarity_index
            .total_cmp(&a.dissimilarity_index)
            .then(seq_a.cmp(seq_b))
    });

    report.ranked =
        RankedDistricts::from_sorted(tagged.into_iter().map(|(_, result)| result).collect());
    report
}
