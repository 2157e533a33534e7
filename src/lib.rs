//! A Rust library for ranking school districts by the index of dissimilarity
//! between two demographic groups across their high schools.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod models;
pub mod prompt;
pub mod reader;
pub mod utils;
pub mod writer;

// Re-export the most common types for easier use
// Core types
pub use config::{ColumnMapping, DistrictLookup, RankingConfig};
pub use error::{Result, SegregationError};
pub use models::{
    ComparisonMode, CountCell, DemographicCategory, District, DistrictResult, RankPosition,
    RankedDistricts, RawSchoolRow, SchoolRecord, Selector, SizeThreshold,
};

// Ranking pipeline
pub use algorithm::segregation::{
    EligibilityCriteria, PipelineStats, RankingOutcome, RankingSummary, SegregationPipeline,
    dissimilarity_index, group_by_district, rank_districts, rank_districts_with,
    validate_records,
};

// Table input and output
pub use reader::read_school_table;
pub use writer::{output_file_name, write_outputs, write_results_csv, write_results_json};
