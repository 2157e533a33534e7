//! End-to-end runs: school table in, ranking tables out

use std::fs;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use segregation_rank::algorithm::segregation::lookup_report;
use segregation_rank::{
    ColumnMapping, ComparisonMode, RankingConfig, SegregationError, SegregationPipeline,
    SizeThreshold, read_school_table, write_outputs,
};
use tempfile::TempDir;

use crate::utils::{CsvRow, write_school_csv};

const EPSILON: f64 = 1e-9;

/// Two ranked districts (one in California), plus rows that must be dropped
const SCHOOLS: &[CsvRow<'static>] = &[
    ["0601", "High", "Coastal Unified", "California", "500", "700", "100", "200", "1500"],
    ["0601", "High", "Coastal Unified", "California", "1000", "300", "50", "150", "1500"],
    ["0601", "Middle", "Coastal Unified", "California", "900", "0", "0", "0", "900"],
    ["4801", "High", "Prairie ISD", "Texas", "1000", "300", "100", "100", "1500"],
    ["4801", "High", "Prairie ISD", "Texas", "100", "1200", "100", "100", "1500"],
    ["0602", "High", "Valley Joint", "California", "†", "500", "50", "50", "1200"],
    ["0602", "High", "Valley Joint", "California", "300", "500", "50", "50", "1200"],
    ["0603", "High", "Lone Pine", "California", "1500", "1500", "0", "0", "3000"],
    ["–", "High", "Unassigned", "California", "10", "10", "0", "0", "20"],
];

fn config_for(input: &Path, output_dir: &Path) -> RankingConfig {
    RankingConfig {
        input_path: input.to_path_buf(),
        output_dir: output_dir.to_path_buf(),
        comparison_mode: Some(ComparisonMode::HispanicVsRest),
        size_threshold: Some(SizeThreshold::Small),
        ..RankingConfig::default()
    }
}

/// Parse a written CSV table into (id, index) pairs, checking the header
fn read_ranking(path: &Path) -> Vec<(String, f64)> {
    let contents = fs::read_to_string(path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next(),
        Some("District Name,nces_id,Dissimilarity,State,Size")
    );
    lines
        .map(|line| {
            let fields: Vec<&str> = line.split(',').collect();
            assert_eq!(fields.len(), 5, "unexpected row: {line}");
            (fields[1].to_string(), fields[2].parse::<f64>().unwrap())
        })
        .collect()
}

#[test]
fn test_csv_table_to_ranking_files() {
    let dir = TempDir::new().unwrap();
    let input = write_school_csv(dir.path(), "schools.csv", SCHOOLS);
    let output_dir = dir.path().join("out");
    let config = config_for(&input, &output_dir);

    let rows = read_school_table(&config.input_path, &config.columns).unwrap();
    assert_eq!(rows.len(), SCHOOLS.len());

    let outcome = SegregationPipeline::new(ComparisonMode::HispanicVsRest, SizeThreshold::Small)
        .run(&rows)
        .unwrap();
    assert_eq!(outcome.stats.rows_not_high_school, 1);
    assert_eq!(outcome.stats.rows_marker_excluded, 1);
    assert_eq!(outcome.stats.rows_missing_district_id, 1);
    // 0602 loses a school to the marker and 0603 has only one
    assert_eq!(outcome.stats.districts_too_few_schools, 2);
    assert_eq!(outcome.stats.districts_ranked, 2);

    let written = write_outputs(
        &config,
        ComparisonMode::HispanicVsRest,
        SizeThreshold::Small,
        &outcome.ranked,
    )
    .unwrap();
    assert_eq!(
        written,
        vec![
            output_dir.join("district_seg_hispanic_v_non_us_small.csv"),
            output_dir.join("district_seg_hispanic_v_non_ca_small.csv"),
        ]
    );

    // Prairie: |1000/1100 - 500/1900| + |100/1100 - 1400/1900|, halved
    let prairie = 1000.0 / 1100.0 - 500.0 / 1900.0;
    let national = read_ranking(&written[0]);
    assert_eq!(national.len(), 2);
    assert_eq!(national[0].0, "4801");
    assert!((national[0].1 - prairie).abs() < EPSILON);
    assert_eq!(national[1].0, "0601");
    assert!((national[1].1 - 1.0 / 3.0).abs() < EPSILON);

    let regional = read_ranking(&written[1]);
    assert_eq!(regional.len(), 1);
    assert_eq!(regional[0].0, "0601");

    let lines = lookup_report(
        &outcome.ranked,
        [("0601", "Coastal Unified"), ("0603", "Lone Pine")],
    );
    assert_eq!(
        lines,
        vec![
            "Ranking of Coastal Unified: 1/2 (percentile 50.0)".to_string(),
            "Lone Pine does not satisfy criteria or does not exist".to_string(),
        ]
    );
}

#[test]
fn test_json_output_alongside_csv() {
    let dir = TempDir::new().unwrap();
    let input = write_school_csv(dir.path(), "schools.csv", SCHOOLS);
    let mut config = config_for(&input, dir.path());
    config.region_state = None;
    config.write_json = true;

    let rows = read_school_table(&config.input_path, &config.columns).unwrap();
    let outcome = SegregationPipeline::new(ComparisonMode::HispanicVsRest, SizeThreshold::Small)
        .run(&rows)
        .unwrap();
    let written = write_outputs(
        &config,
        ComparisonMode::HispanicVsRest,
        SizeThreshold::Small,
        &outcome.ranked,
    )
    .unwrap();
    assert_eq!(written.len(), 2);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&written[1]).unwrap()).unwrap();
    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["nces_id"], "4801");
    assert_eq!(records[0]["District Name"], "Prairie ISD");
    assert_eq!(records[0]["State"], "Texas");
    assert_eq!(records[0]["Size"], 3000);
}

#[test]
fn test_bad_count_aborts_before_output() {
    let dir = TempDir::new().unwrap();
    let mut rows = SCHOOLS.to_vec();
    rows.push([
        "4802", "High", "Broken Bow", "Texas", "12x", "100", "10", "10", "500",
    ]);
    let input = write_school_csv(dir.path(), "schools.csv", &rows);
    let output_dir = dir.path().join("out");
    let config = config_for(&input, &output_dir);

    let raw = read_school_table(&config.input_path, &config.columns).unwrap();
    let err = SegregationPipeline::new(ComparisonMode::HispanicVsRest, SizeThreshold::Small)
        .run(&raw)
        .unwrap_err();
    assert!(matches!(err, SegregationError::DataIntegrity { .. }));
    assert!(err.is_data_error());
    assert!(!output_dir.exists());
}

#[test]
fn test_parquet_table_with_numeric_counts() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("schools.parquet");
    let columns = ColumnMapping::default();

    let text = |values: &[&str]| -> ArrayRef { Arc::new(StringArray::from(values.to_vec())) };
    let number = |values: &[i64]| -> ArrayRef { Arc::new(Int64Array::from(values.to_vec())) };
    let names = columns.all_columns();
    let schema = Arc::new(Schema::new(
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let data_type = if i < 4 { DataType::Utf8 } else { DataType::Int64 };
                Field::new(*name, data_type, true)
            })
            .collect::<Vec<_>>(),
    ));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            text(&["0601", "0601", "4801", "4801"]),
            text(&["High", "High", "High", "High"]),
            text(&["Coastal Unified", "Coastal Unified", "Prairie ISD", "Prairie ISD"]),
            text(&["California", "California", "Texas", "Texas"]),
            number(&[500, 1000, 1000, 100]),
            number(&[700, 300, 300, 1200]),
            number(&[100, 50, 100, 100]),
            number(&[200, 150, 100, 100]),
            number(&[1500, 1500, 1500, 1500]),
        ],
    )
    .unwrap();

    let file = fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let rows = read_school_table(&path, &columns).unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].hispanic, "500");

    let outcome = SegregationPipeline::new(ComparisonMode::HispanicVsRest, SizeThreshold::Small)
        .run(&rows)
        .unwrap();
    let ids: Vec<&str> = outcome
        .ranked
        .results()
        .iter()
        .map(|r| r.district_id.as_str())
        .collect();
    assert_eq!(ids, ["4801", "0601"]);
}

#[test]
fn test_empty_required_count_is_a_data_error() {
    let dir = TempDir::new().unwrap();
    let mut rows = SCHOOLS.to_vec();
    rows.push(["4803", "High", "Mesa Vista", "Texas", "", "100", "10", "10", "500"]);
    let input = write_school_csv(dir.path(), "schools.csv", &rows);

    let raw = read_school_table(&input, &ColumnMapping::default()).unwrap();
    let err = SegregationPipeline::new(ComparisonMode::HispanicVsRest, SizeThreshold::Small)
        .run(&raw)
        .unwrap_err();
    match err {
        SegregationError::DataIntegrity { row, column, value } => {
            assert_eq!(row, rows.len());
            assert_eq!(column, "Hispanic");
            assert_eq!(value, "");
        }
        other => panic!("unexpected error: {other}"),
    }

    // The same row is fine when the mode never reads the Hispanic column
    let outcome = SegregationPipeline::new(ComparisonMode::WhiteVsRest, SizeThreshold::Small)
        .run(&raw)
        .unwrap();
    // Six high schools plus both 0602 rows, whose marker is only in Hispanic
    assert_eq!(outcome.stats.rows_kept, 8);
}
