//! Domain models for district segregation ranking
//!
//! This module contains the entities passed between the pipeline stages:
//! raw and validated school rows, districts, the run selectors and the
//! ranked results.

pub mod cell;
pub mod district;
pub mod school;
pub mod selectors;

// Re-export commonly used types
pub use cell::{CellParse, CountCell};
pub use district::{District, DistrictResult, RankPosition, RankedDistricts, describe_lookup};
pub use school::{RawSchoolRow, SchoolRecord};
pub use selectors::{ComparisonMode, DemographicCategory, GroupSplit, Selector, SizeThreshold};
