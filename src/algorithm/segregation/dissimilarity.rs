//! Index of dissimilarity
//!
//! For groups A and B spread over the schools of a district,
//!
//! ```text
//! D = 1/2 * sum over schools |a_i / A - b_i / B|
//! ```
//!
//! where `a_i`, `b_i` are the school's group counts and `A`, `B` the district
//! totals. In the versus-rest modes B is `total - A`. D lies in `[0, 1]` as
//! long as no school reports a group larger than its total; dirty rows that do
//! make B negative and can push D above 1. The direct modes take B as an
//! independent raw count. Both groups are then non-negative distributions over
//! the schools, so D stays within `[0, 1]` even though the groups need not
//! partition the students.

use log::debug;

use crate::models::{ComparisonMode, DemographicCategory, District, GroupSplit, SchoolRecord};

/// Group counts for one school or a whole district
///
/// Signed so that a subgroup larger than the reported total (dirty input)
/// yields a negative remainder instead of wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupCounts {
    pub group_a: i64,
    pub group_b: i64,
    pub total: i64,
}

impl GroupCounts {
    /// Add two sets of counts, or `None` if any sum overflows
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        Some(Self {
            group_a: self.group_a.checked_add(other.group_a)?,
            group_b: self.group_b.checked_add(other.group_b)?,
            total: self.total.checked_add(other.total)?,
        })
    }
}

fn count_of(school: &SchoolRecord, category: DemographicCategory) -> Option<i64> {
    school.count(category).and_then(|n| i64::try_from(n).ok())
}

/// Split one school's counts into the two compared groups
///
/// Returns `None` if a count the mode needs is not valid or a sum overflows.
#[must_use]
pub fn school_groups(school: &SchoolRecord, mode: ComparisonMode) -> Option<GroupCounts> {
    let total = count_of(school, DemographicCategory::TotalEnrollment)?;
    let (group_a, group_b) = match mode.split() {
        GroupSplit::VersusRest(categories) => {
            let group_a = categories
                .iter()
                .try_fold(0i64, |sum, c| sum.checked_add(count_of(school, *c)?))?;
            (group_a, total.checked_sub(group_a)?)
        }
        GroupSplit::Direct { group_a, group_b } => {
            (count_of(school, group_a)?, count_of(school, group_b)?)
        }
    };

    Some(GroupCounts {
        group_a,
        group_b,
        total,
    })
}

/// Sum the group counts over every school in a district
#[must_use]
pub fn district_groups(district: &District, mode: ComparisonMode) -> Option<GroupCounts> {
    district
        .schools()
        .iter()
        .try_fold(GroupCounts::default(), |sum, s| {
            sum.checked_add(school_groups(s, mode)?)
        })
}

/// Compute the dissimilarity index of a district
///
/// Returns `None` when the index is not computable: the district total or
/// either group total is zero, a school lacks a count the mode needs, or the
/// sums do not fit in an `i64`.
#[must_use]
pub fn dissimilarity_index(district: &District, mode: ComparisonMode) -> Option<f64> {
    let Some(per_school) = district
        .schools()
        .iter()
        .map(|s| school_groups(s, mode))
        .collect::<Option<Vec<_>>>()
    else {
        debug!(
            "District {} has a school without usable counts for {mode}",
            district.district_id()
        );
        return None;
    };

    let Some(totals) = per_school
        .iter()
        .try_fold(GroupCounts::default(), |sum, s| sum.checked_add(*s))
    else {
        debug!(
            "District {} counts overflow for {mode}",
            district.district_id()
        );
        return None;
    };
    if totals.total == 0 || totals.group_a == 0 || totals.group_b == 0 {
        debug!(
            "District {} not computable for {mode}: total={}, A={}, B={}",
            district.district_id(),
            totals.total,
            totals.group_a,
            totals.group_b
        );
        return None;
    }

    let (total_a, total_b) = (totals.group_a as f64, totals.group_b as f64);
    let sum: f64 = per_school
        .iter()
        .map(|s| (s.group_a as f64 / total_a - s.group_b as f64 / total_b).abs())
        .sum();

    Some(sum / 2.0)
}
