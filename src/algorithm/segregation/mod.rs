//! District segregation ranking
//!
//! Raw rows flow through [`validation`], [`grouping`] and [`ranking`], which
//! calls the [`dissimilarity`] engine per district. [`pipeline`] chains the
//! stages for one run.

pub mod dissimilarity;
pub mod grouping;
pub mod pipeline;
pub mod ranking;
pub mod statistics;
pub mod validation;

// Re-export commonly used items
pub use dissimilarity::{GroupCounts, dissimilarity_index, school_groups};
pub use grouping::group_by_district;
pub use pipeline::{PipelineStats, RankingOutcome, SegregationPipeline};
pub use ranking::{
    EligibilityCriteria, MIN_SCHOOLS, RankingReport, SkipReason, rank_districts,
    rank_districts_with, rank_districts_with_report,
};
pub use statistics::{RankingSummary, lookup_report};
pub use validation::{ValidationReport, validate_records, validate_records_with_report};
