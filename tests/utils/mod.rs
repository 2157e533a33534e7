use std::fs;
use std::path::{Path, PathBuf};

use segregation_rank::{ColumnMapping, DemographicCategory, District, SchoolRecord};

/// Counts for one school: Hispanic, White, Asian, Black, Total
pub type Counts = [u64; 5];

/// Build a validated school record for a district
#[must_use]
pub fn school(district_id: &str, counts: Counts) -> SchoolRecord {
    let [hispanic, white, asian, black, total] = counts;
    SchoolRecord::new(district_id, format!("District {district_id}"), "California")
        .with_count(DemographicCategory::Hispanic, hispanic)
        .with_count(DemographicCategory::White, white)
        .with_count(DemographicCategory::Asian, asian)
        .with_count(DemographicCategory::Black, black)
        .with_count(DemographicCategory::TotalEnrollment, total)
}

/// Build a district from per-school counts
#[must_use]
pub fn district(district_id: &str, schools: &[Counts]) -> District {
    District::try_from_schools(schools.iter().map(|c| school(district_id, *c)).collect())
        .expect("district needs at least one school")
}

/// One input line: id, level, name, state, Hispanic, White, Asian, Black, Total
pub type CsvRow<'a> = [&'a str; 9];

/// Write a school table with the default NCES headers
pub fn write_school_csv(dir: &Path, file_name: &str, rows: &[CsvRow<'_>]) -> PathBuf {
    let columns = ColumnMapping::default();
    let header = columns
        .all_columns()
        .iter()
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join(",");

    let mut contents = header;
    contents.push('\n');
    for row in rows {
        let line = row
            .iter()
            .map(|cell| format!("\"{cell}\""))
            .collect::<Vec<_>>()
            .join(",");
        contents.push_str(&line);
        contents.push('\n');
    }

    let path = dir.join(file_name);
    fs::write(&path, contents).expect("failed to write test CSV");
    path
}
