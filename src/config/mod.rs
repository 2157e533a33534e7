//! Configuration for a ranking run.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::util::safe_open_file;
use crate::error::{Result, SegregationError};
use crate::models::{ComparisonMode, SizeThreshold};

/// Input column names for each logical field
///
/// Defaults are the headers of the NCES Common Core of Data 2021-22 public
/// school export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub school_level: String,
    pub district_id: String,
    pub district_name: String,
    pub state_name: String,
    pub hispanic: String,
    pub white: String,
    pub asian: String,
    pub black: String,
    pub total: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            school_level: "School Level (SY 2017-18 onward) [Public School] 2021-22".to_string(),
            district_id: "Agency ID - NCES Assigned [Public School] Latest available year"
                .to_string(),
            district_name: "Agency Name [Public School] 2021-22".to_string(),
            state_name: "State Name [Public School] Latest available year".to_string(),
            hispanic: "Hispanic Students [Public School] 2021-22".to_string(),
            white: "White Students [Public School] 2021-22".to_string(),
            asian: "Asian or Asian/Pacific Islander Students [Public School] 2021-22".to_string(),
            black: "Black or African American Students [Public School] 2021-22".to_string(),
            total: "Total Race/Ethnicity [Public School] 2021-22".to_string(),
        }
    }
}

impl ColumnMapping {
    /// Every mapped column, in reader order
    #[must_use]
    pub fn all_columns(&self) -> [&str; 9] {
        [
            self.district_id.as_str(),
            self.school_level.as_str(),
            self.district_name.as_str(),
            self.state_name.as_str(),
            self.hispanic.as_str(),
            self.white.as_str(),
            self.asian.as_str(),
            self.black.as_str(),
            self.total.as_str(),
        ]
    }
}

/// A district whose rank position is reported after a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistrictLookup {
    pub district_id: String,
    pub name: String,
}

impl DistrictLookup {
    /// Parse `ID=NAME`
    pub fn parse(value: &str) -> Result<Self> {
        let (district_id, name) = value.split_once('=').ok_or_else(|| {
            SegregationError::config(format!("lookup '{value}' must have the form ID=NAME"))
        })?;
        let (district_id, name) = (district_id.trim(), name.trim());
        if district_id.is_empty() || name.is_empty() {
            return Err(SegregationError::config(format!(
                "lookup '{value}' has an empty id or name"
            )));
        }
        Ok(Self {
            district_id: district_id.to_string(),
            name: name.to_string(),
        })
    }
}

/// Configuration for a ranking run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Input table (`.csv` or `.parquet`)
    pub input_path: PathBuf,
    /// Directory receiving the result tables
    pub output_dir: PathBuf,
    /// Pair of groups being compared
    pub comparison_mode: Option<ComparisonMode>,
    /// Minimum district enrollment
    pub size_threshold: Option<SizeThreshold>,
    /// State for the regional view, if any
    pub region_state: Option<String>,
    /// File name label for the regional view
    pub region_label: String,
    /// File name label for the full table
    pub national_label: String,
    /// Also write the results as JSON
    pub write_json: bool,
    /// Input column names
    pub columns: ColumnMapping,
    /// Districts to report rank positions for
    pub lookups: Vec<DistrictLookup>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("data/us.csv"),
            output_dir: PathBuf::from("data"),
            comparison_mode: None,
            size_threshold: None,
            region_state: Some("California".to_string()),
            region_label: "ca".to_string(),
            national_label: "us".to_string(),
            write_json: false,
            columns: ColumnMapping::default(),
            lookups: Vec::new(),
        }
    }
}

impl RankingConfig {
    /// Load a configuration from a JSON file
    ///
    /// Fields missing from the file keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = safe_open_file(path, "reading ranking configuration")?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that would produce unusable output
    pub fn validate(&self) -> Result<()> {
        if self.national_label.trim().is_empty() {
            return Err(SegregationError::config("national_label must not be empty"));
        }
        if self.region_state.is_some() && self.region_label.trim().is_empty() {
            return Err(SegregationError::config(
                "region_label must not be empty when region_state is set",
            ));
        }
        let columns = self.columns.all_columns();
        if columns.iter().any(|c| c.trim().is_empty()) {
            return Err(SegregationError::config("column names must not be empty"));
        }
        Ok(())
    }
}

impl fmt::Display for RankingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Ranking Configuration:")?;
        writeln!(f, "  Input: {}", self.input_path.display())?;
        writeln!(f, "  Output Directory: {}", self.output_dir.display())?;
        if let Some(mode) = self.comparison_mode {
            writeln!(f, "  Comparison Mode: {mode}")?;
        }
        if let Some(size) = self.size_threshold {
            writeln!(f, "  Size Threshold: {size} (>= {})", size.min_enrollment())?;
        }
        if let Some(state) = &self.region_state {
            writeln!(f, "  Regional View: {state} ({})", self.region_label)?;
        }
        writeln!(f, "  JSON Output: {}", self.write_json)?;
        if !self.lookups.is_empty() {
            writeln!(f, "  Lookups: {}", self.lookups.len())?;
        }
        Ok(())
    }
}
