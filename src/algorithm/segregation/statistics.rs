//! Ranking statistics and summaries

use itertools::Itertools;

use crate::models::{RankedDistricts, describe_lookup};

/// Distribution of dissimilarity indices across a ranking
#[derive(Debug, Clone, PartialEq)]
pub struct RankingSummary {
    pub district_count: usize,
    pub max_index: f64,
    pub min_index: f64,
    pub mean_index: f64,
    pub median_index: f64,
    pub total_enrollment: u64,
}

impl RankingSummary {
    /// Summarise a ranking; `None` when it is empty
    #[must_use]
    pub fn from_ranked(ranked: &RankedDistricts) -> Option<Self> {
        if ranked.is_empty() {
            return None;
        }

        let indices: Vec<f64> = ranked
            .results()
            .iter()
            .map(|r| r.dissimilarity_index)
            .sorted_by(f64::total_cmp)
            .collect();
        let count = indices.len();
        let median_index = if count % 2 == 0 {
            (indices[count / 2 - 1] + indices[count / 2]) / 2.0
        } else {
            indices[count / 2]
        };

        Some(Self {
            district_count: count,
            max_index: indices[count - 1],
            min_index: indices[0],
            mean_index: indices.iter().sum::<f64>() / count as f64,
            median_index,
            total_enrollment: ranked.results().iter().map(|r| r.total_enrollment).sum(),
        })
    }

    /// Multi-line report of the summary
    #[must_use]
    pub fn report(&self) -> String {
        let mut summary = String::new();
        summary.push_str("Ranking Summary:\n");
        summary.push_str(&format!("  Ranked Districts: {}\n", self.district_count));
        summary.push_str(&format!("  Students Covered: {}\n", self.total_enrollment));
        summary.push_str(&format!("  Highest Index: {:.4}\n", self.max_index));
        summary.push_str(&format!("  Median Index: {:.4}\n", self.median_index));
        summary.push_str(&format!("  Mean Index: {:.4}\n", self.mean_index));
        summary.push_str(&format!("  Lowest Index: {:.4}\n", self.min_index));
        summary
    }
}

/// Report lines for a set of named district lookups
#[must_use]
pub fn lookup_report<'a, I>(ranked: &RankedDistricts, lookups: I) -> Vec<String>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    lookups
        .into_iter()
        .map(|(district_id, name)| describe_lookup(name, ranked.position_of(district_id)))
        .collect()
}
