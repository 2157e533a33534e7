//! Reading the per-school input table
//!
//! CSV and Parquet files are both read into Arrow record batches, projected
//! onto the mapped columns and turned into [`RawSchoolRow`]s. Every value is
//! kept as text; nulls become empty strings, which the validator rejects in
//! any column the comparison mode needs.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ProjectionMask;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::config::ColumnMapping;
use crate::error::util::safe_open_file;
use crate::error::{Result, SegregationError};
use crate::models::RawSchoolRow;
use crate::utils::logging::{log_operation_start, log_rows_read, log_warning};
use crate::utils::{batch_size, create_spinner, finish_and_clear};

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Parquet,
}

impl TableFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("parquet") => Ok(Self::Parquet),
            _ => Err(SegregationError::config(format!(
                "unsupported input file '{}', expected .csv or .parquet",
                path.display()
            ))),
        }
    }
}

/// Read the school table at `path` into raw rows
pub fn read_school_table(path: &Path, columns: &ColumnMapping) -> Result<Vec<RawSchoolRow>> {
    let start = Instant::now();
    log_operation_start("Reading school table", path);
    let spinner = create_spinner(Some(&format!("Reading {}", path.display())));

    let batches = match TableFormat::from_path(path)? {
        TableFormat::Csv => read_csv_batches(path),
        TableFormat::Parquet => read_parquet_batches(path, columns),
    };
    finish_and_clear(&spinner);
    let batches = batches?;

    let source_name = path.display().to_string();
    let mut rows = Vec::with_capacity(batches.iter().map(RecordBatch::num_rows).sum());
    for batch in &batches {
        rows.extend(batch_to_rows(batch, columns, &source_name)?);
    }

    if rows.is_empty() {
        log_warning("School table has no data rows", Some(path));
    }
    log_rows_read(path, rows.len(), start.elapsed());
    Ok(rows)
}

/// Read a CSV file with every column typed as nullable text
pub fn read_csv_batches(path: &Path) -> Result<Vec<RecordBatch>> {
    let format = Format::default().with_header(true);
    let (inferred, _) = format.infer_schema(safe_open_file(path, "reading CSV header")?, Some(0))?;

    let schema = Schema::new(
        inferred
            .fields()
            .iter()
            .map(|f| Field::new(f.name(), DataType::Utf8, true))
            .collect::<Vec<_>>(),
    );

    let reader = ReaderBuilder::new(Arc::new(schema))
        .with_format(format)
        .with_batch_size(batch_size())
        .build(safe_open_file(path, "reading CSV rows")?)?;

    reader
        .map(|batch| batch.map_err(SegregationError::from))
        .collect()
}

/// Read a Parquet file, projecting onto the mapped columns
pub fn read_parquet_batches(path: &Path, columns: &ColumnMapping) -> Result<Vec<RecordBatch>> {
    let file = safe_open_file(path, "reading parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    let file_schema = builder.schema();
    let mut projection = Vec::new();
    for name in columns.all_columns() {
        let index = file_schema
            .index_of(name)
            .map_err(|_| SegregationError::MissingColumn {
                column: name.to_string(),
                source_name: path.display().to_string(),
            })?;
        projection.push(index);
    }
    let mask = ProjectionMask::roots(builder.parquet_schema(), projection);

    let reader = builder
        .with_projection(mask)
        .with_batch_size(batch_size())
        .build()?;

    reader
        .map(|batch| batch.map_err(SegregationError::from))
        .collect()
}

/// Look up a column by name and cast it to text
fn text_column(batch: &RecordBatch, name: &str, source_name: &str) -> Result<ArrayRef> {
    let index = batch
        .schema()
        .index_of(name)
        .map_err(|_| SegregationError::MissingColumn {
            column: name.to_string(),
            source_name: source_name.to_string(),
        })?;
    let column = batch.column(index);
    if column.data_type() == &DataType::Utf8 {
        Ok(Arc::clone(column))
    } else {
        Ok(cast(column, &DataType::Utf8)?)
    }
}

/// Convert one record batch into raw rows
pub fn batch_to_rows(
    batch: &RecordBatch,
    columns: &ColumnMapping,
    source_name: &str,
) -> Result<Vec<RawSchoolRow>> {
    let arrays = columns
        .all_columns()
        .map(|name| text_column(batch, name, source_name));
    let [
        district_id,
        school_level,
        district_name,
        state_name,
        hispanic,
        white,
        asian,
        black,
        total,
    ] = arrays;
    let (district_id, school_level, district_name, state_name) =
        (district_id?, school_level?, district_name?, state_name?);
    let (hispanic, white, asian, black, total) = (hispanic?, white?, asian?, black?, total?);

    let text = |array: &ArrayRef, row: usize| -> String {
        if array.is_null(row) {
            String::new()
        } else {
            array.as_string::<i32>().value(row).to_string()
        }
    };

    Ok((0..batch.num_rows())
        .map(|row| RawSchoolRow {
            district_id: text(&district_id, row),
            school_level: text(&school_level, row),
            district_name: text(&district_name, row),
            state_name: text(&state_name, row),
            hispanic: text(&hispanic, row),
            white: text(&white, row),
            asian: text(&asian, row),
            black: text(&black, row),
            total: text(&total, row),
        })
        .collect())
}
