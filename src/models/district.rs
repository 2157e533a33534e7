//! Districts and ranked district results

use serde::{Deserialize, Serialize};

use crate::models::school::SchoolRecord;

/// A group of high schools sharing a district identifier
///
/// Always holds at least one school. Name and state come from the first
/// school in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct District {
    district_id: String,
    schools: Vec<SchoolRecord>,
}

impl District {
    /// Start a district from its first school
    #[must_use]
    pub fn new(first: SchoolRecord) -> Self {
        Self {
            district_id: first.district_id().to_string(),
            schools: vec![first],
        }
    }

    /// Build a district from schools that all share one identifier
    ///
    /// Returns `None` for an empty list or mixed identifiers.
    #[must_use]
    pub fn try_from_schools(schools: Vec<SchoolRecord>) -> Option<Self> {
        let district_id = schools.first()?.district_id().to_string();
        if schools.iter().any(|s| s.district_id() != district_id) {
            return None;
        }
        Some(Self {
            district_id,
            schools,
        })
    }

    pub(crate) fn push(&mut self, school: SchoolRecord) {
        debug_assert_eq!(school.district_id(), self.district_id);
        self.schools.push(school);
    }

    #[must_use]
    pub fn district_id(&self) -> &str {
        &self.district_id
    }

    /// Member schools in input order
    #[must_use]
    pub fn schools(&self) -> &[SchoolRecord] {
        &self.schools
    }

    #[must_use]
    pub fn school_count(&self) -> usize {
        self.schools.len()
    }

    /// Sum of total enrollment across member schools
    ///
    /// Saturates at `u64::MAX`; such a district is never computable, since
    /// the index sums the same totals with overflow checks.
    #[must_use]
    pub fn total_enrollment(&self) -> u64 {
        self.schools
            .iter()
            .map(SchoolRecord::total_enrollment)
            .fold(0, u64::saturating_add)
    }

    #[must_use]
    pub fn district_name(&self) -> &str {
        self.schools[0].district_name()
    }

    #[must_use]
    pub fn state_name(&self) -> &str {
        self.schools[0].state_name()
    }

    /// Whether every member reports the same district name and state
    #[must_use]
    pub fn has_consistent_metadata(&self) -> bool {
        let (name, state) = (self.district_name(), self.state_name());
        self.schools
            .iter()
            .all(|s| s.district_name() == name && s.state_name() == state)
    }
}

/// One ranked district
///
/// Field names match the output table headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictResult {
    #[serde(rename = "District Name")]
    pub district_name: String,
    #[serde(rename = "nces_id")]
    pub district_id: String,
    #[serde(rename = "Dissimilarity")]
    pub dissimilarity_index: f64,
    #[serde(rename = "State")]
    pub state_name: String,
    #[serde(rename = "Size")]
    pub total_enrollment: u64,
}

/// Position of a district within a ranking
///
/// `position` counts from the least segregated district (1) up to the most
/// segregated (`total`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankPosition {
    pub position: usize,
    pub total: usize,
}

impl RankPosition {
    /// Share of ranked districts at or below this one, in percent
    #[must_use]
    pub fn percentile(&self) -> f64 {
        self.position as f64 / self.total as f64 * 100.0
    }
}

/// Districts sorted by dissimilarity index, highest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedDistricts {
    results: Vec<DistrictResult>,
}

impl RankedDistricts {
    /// Wrap results that are already in ranked order
    pub(crate) fn from_sorted(results: Vec<DistrictResult>) -> Self {
        Self { results }
    }

    #[must_use]
    pub fn results(&self) -> &[DistrictResult] {
        &self.results
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Look up a district's rank position by identifier
    #[must_use]
    pub fn position_of(&self, district_id: &str) -> Option<RankPosition> {
        let total = self.results.len();
        self.results
            .iter()
            .position(|r| r.district_id == district_id)
            .map(|index| RankPosition {
                position: total - index,
                total,
            })
    }

    /// Results for a single state, keeping ranked order
    #[must_use]
    pub fn filter_by_state(&self, state_name: &str) -> Self {
        Self {
            results: self
                .results
                .iter()
                .filter(|r| r.state_name == state_name)
                .cloned()
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RankedDistricts {
    type Item = &'a DistrictResult;
    type IntoIter = std::slice::Iter<'a, DistrictResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

/// Describe where a named district landed, in the report format
#[must_use]
pub fn describe_lookup(name: &str, position: Option<RankPosition>) -> String {
    match position {
        Some(p) => format!(
            "Ranking of {name}: {}/{} (percentile {:.1})",
            p.position,
            p.total,
            p.percentile()
        ),
        None => format!("{name} does not satisfy criteria or does not exist"),
    }
}
