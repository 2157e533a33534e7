//! Writing ranked district tables
//!
//! Results are converted to an Arrow record batch with `serde_arrow` and
//! written as CSV; a JSON copy can be written alongside. A run writes the
//! full national table and, when a state is configured, a regional table
//! holding only that state's districts in the same order.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use arrow::csv::WriterBuilder;
use arrow::datatypes::FieldRef;
use arrow::record_batch::RecordBatch;
use serde_arrow::schema::{SchemaLike, TracingOptions};

use crate::config::RankingConfig;
use crate::error::Result;
use crate::error::util::safe_create_file;
use crate::models::{ComparisonMode, DistrictResult, RankedDistricts, SizeThreshold};
use crate::utils::logging::{log_operation_start, log_rows_written, log_warning};

/// Output file name for a mode, region label and size threshold
///
/// For example `district_seg_hispanic_v_non_us_small.csv`.
#[must_use]
pub fn output_file_name(
    mode: ComparisonMode,
    region_label: &str,
    size: SizeThreshold,
    extension: &str,
) -> String {
    format!("district_seg_{mode}_{region_label}_{size}.{extension}")
}

/// Arrow fields for the output table
pub fn result_fields() -> Result<Vec<FieldRef>> {
    Ok(Vec::<FieldRef>::from_type::<DistrictResult>(
        TracingOptions::default(),
    )?)
}

/// Convert results to a record batch with the output column names
pub fn results_to_record_batch(results: &[DistrictResult]) -> Result<RecordBatch> {
    let fields = result_fields()?;
    Ok(serde_arrow::to_record_batch(&fields, &results)?)
}

/// Write results as CSV with a header row
pub fn write_results_csv(path: &Path, results: &[DistrictResult]) -> Result<()> {
    write_batch_csv(path, &results_to_record_batch(results)?)
}

/// Write results as a pretty-printed JSON array
pub fn write_results_json(path: &Path, results: &[DistrictResult]) -> Result<()> {
    write_json_text(path, &serde_json::to_string_pretty(results)?, results.len())
}

fn write_batch_csv(path: &Path, batch: &RecordBatch) -> Result<()> {
    let start = Instant::now();
    log_operation_start("Writing ranking table", path);

    let file = safe_create_file(path)?;
    let mut writer = WriterBuilder::new()
        .with_header(true)
        .build(BufWriter::new(file));
    writer.write(batch)?;
    writer.into_inner().flush()?;

    log_rows_written(path, batch.num_rows(), Some(start.elapsed()));
    Ok(())
}

fn write_json_text(path: &Path, json: &str, rows: usize) -> Result<()> {
    log_operation_start("Writing ranking JSON", path);
    let file = safe_create_file(path)?;
    let mut out = BufWriter::new(file);
    out.write_all(json.as_bytes())?;
    out.flush()?;
    log_rows_written(path, rows, None);
    Ok(())
}

/// One output file, fully encoded before anything touches the disk
enum EncodedOutput {
    Csv(RecordBatch),
    Json { text: String, rows: usize },
}

impl EncodedOutput {
    fn write(&self, path: &Path) -> Result<()> {
        match self {
            Self::Csv(batch) => write_batch_csv(path, batch),
            Self::Json { text, rows } => write_json_text(path, text, *rows),
        }
    }
}

/// Delete files left behind by a failed run
fn remove_outputs<'a>(paths: impl IntoIterator<Item = &'a Path>) {
    for path in paths {
        if !path.is_file() {
            continue;
        }
        if let Err(e) = fs::remove_file(path) {
            log_warning(&format!("Failed to remove partial output ({e})"), Some(path));
        }
    }
}

/// Write the national table and, if configured, the regional view
///
/// Every table is encoded before the first file is created. If any write
/// fails, the files already written by this call are removed again.
/// Returns the paths written, national table first.
pub fn write_outputs(
    config: &RankingConfig,
    mode: ComparisonMode,
    size: SizeThreshold,
    ranked: &RankedDistricts,
) -> Result<Vec<PathBuf>> {
    let regional = config
        .region_state
        .as_deref()
        .map(|state| ranked.filter_by_state(state));

    let mut tables = vec![(config.national_label.as_str(), ranked)];
    if let Some(regional) = &regional {
        tables.push((config.region_label.as_str(), regional));
    }

    let mut encoded = Vec::new();
    for (label, table) in tables {
        let csv_path = config
            .output_dir
            .join(output_file_name(mode, label, size, "csv"));
        let batch = results_to_record_batch(table.results())?;
        encoded.push((csv_path, EncodedOutput::Csv(batch)));

        if config.write_json {
            let json_path = config
                .output_dir
                .join(output_file_name(mode, label, size, "json"));
            let text = serde_json::to_string_pretty(table.results())?;
            encoded.push((
                json_path,
                EncodedOutput::Json {
                    text,
                    rows: table.len(),
                },
            ));
        }
    }

    let mut written: Vec<PathBuf> = Vec::with_capacity(encoded.len());
    for (path, output) in encoded {
        if let Err(e) = output.write(&path) {
            remove_outputs(written.iter().map(PathBuf::as_path).chain([path.as_path()]));
            return Err(e);
        }
        written.push(path);
    }

    Ok(written)
}
