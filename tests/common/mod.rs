//! Shared test utilities and fixture generators

#![allow(dead_code)]

use housestat::pipeline::AnalysisConfig;
use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a small house table with known characteristics for testing
///
/// This DataFrame includes:
/// - `SalePrice`: 100k..=280k in steps of 10k plus one 2,000,000 outlier (last row)
///   Q1 = 147,500, Q3 = 242,500, IQR = 95,000, removal boundary = 527,500
/// - `OverallQual`: rises with price
/// - `GrLivArea`: exactly linear in price
/// - `LotFrontage`: 5 of 20 null (25%), a pruned feature
/// - `GarageArea`: 2 of 20 NaN (10%)
/// - `Alley`: categorical, 15 of 20 null (75%), a pruned feature
/// - `PoolArea`: constant, a pruned feature
/// - `Id`: row number, a pruned feature
pub fn create_houses_dataframe() -> DataFrame {
    let mut prices: Vec<f64> = (0..19).map(|i| 100_000.0 + 10_000.0 * i as f64).collect();
    prices.push(2_000_000.0);

    let quality: Vec<i64> = (0..20).map(|i| 1 + i / 2).collect();
    let living_area: Vec<f64> = prices.iter().map(|p| p / 100.0 + 500.0).collect();
    let lot_frontage: Vec<Option<f64>> = (0..20)
        .map(|i| if i % 4 == 0 { None } else { Some(60.0 + i as f64) })
        .collect();
    let garage_area: Vec<f64> = (0..20)
        .map(|i| if i == 3 || i == 11 { f64::NAN } else { 400.0 + 10.0 * i as f64 })
        .collect();
    let alley: Vec<Option<&str>> = (0..20)
        .map(|i| match i {
            0 | 5 | 10 => Some("Grvl"),
            15 | 19 => Some("Pave"),
            _ => None,
        })
        .collect();
    let ids: Vec<i64> = (1..=20).collect();

    df! {
        "Id" => ids,
        "SalePrice" => prices,
        "OverallQual" => quality,
        "GrLivArea" => living_area,
        "LotFrontage" => lot_frontage,
        "GarageArea" => garage_area,
        "Alley" => alley,
        "PoolArea" => [0.0f64; 20],
    }
    .unwrap()
}

/// Create a larger random table for correlation comparisons
pub fn create_large_test_dataframe(rows: usize, cols: usize, seed: u64) -> DataFrame {
    use rand::{Rng, SeedableRng};
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let mut columns: Vec<Column> = Vec::with_capacity(cols + 1);

    let target: Vec<f64> = (0..rows).map(|_| rng.gen_range(50_000.0..400_000.0)).collect();
    for i in 0..cols {
        let weight = i as f64 / cols as f64;
        let values: Vec<f64> = target
            .iter()
            .map(|t| weight * t / 1_000.0 + rng.gen::<f64>() * 100.0)
            .collect();
        columns.push(Column::new(format!("feature_{}", i).into(), values));
    }
    columns.push(Column::new("SalePrice".into(), target));

    DataFrame::new(columns).unwrap()
}

/// Configuration pointing at `path`, otherwise default
pub fn config_for(path: impl Into<PathBuf>) -> AnalysisConfig {
    AnalysisConfig {
        data_path: path.into(),
        ..Default::default()
    }
}

/// Configuration whose input never exists, so loading always falls back
pub fn synthetic_config(rows: usize, seed: u64) -> AnalysisConfig {
    AnalysisConfig {
        data_path: PathBuf::from("/nonexistent/path/to/houses.csv"),
        synthetic_rows: rows,
        seed,
        ..Default::default()
    }
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(rows, expected_rows, "Row count mismatch: expected {}, got {}", expected_rows, rows);
    assert_eq!(cols, expected_cols, "Column count mismatch: expected {}, got {}", expected_cols, cols);
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}

/// Target values of a table as present `f64`s
pub fn prices(df: &DataFrame) -> Vec<f64> {
    df.column("SalePrice")
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .flatten()
        .collect()
}
