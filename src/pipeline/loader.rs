//! Dataset loader for CSV and Parquet files, with a synthetic fallback

use std::path::{Path, PathBuf};

use polars::prelude::*;
use serde::Serialize;
use tracing::{error, info, warn};

use super::config::AnalysisConfig;
use super::error::{AnalysisError, Result};
use super::synthetic::generate_synthetic_table;

/// Where the working table came from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DataSource {
    File { path: PathBuf },
    Synthetic { rows: usize, seed: u64, reason: String },
}

impl DataSource {
    pub fn is_synthetic(&self) -> bool {
        matches!(self, DataSource::Synthetic { .. })
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::File { path } => write!(f, "{}", path.display()),
            DataSource::Synthetic { rows, seed, .. } => {
                write!(f, "synthetic ({} rows, seed {})", rows, seed)
            }
        }
    }
}

/// Cell values read as missing in CSV input.
pub const CSV_NULL_VALUES: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Load a dataset from a file (CSV or Parquet based on extension)
///
/// The table must contain a numeric `target_column`.
pub fn load_dataset(
    path: &Path,
    target_column: &str,
    infer_schema_length: Option<usize>,
) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(infer_schema_length)
            .with_null_values(Some(NullValues::AllColumns(
                CSV_NULL_VALUES.iter().map(|token| (*token).into()).collect(),
            )))
            .finish()?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())?,
        _ => return Err(AnalysisError::UnsupportedFormat(extension)),
    };

    let df = lf.collect()?;

    let target = df
        .column(target_column)
        .map_err(|_| AnalysisError::TargetMissing(target_column.to_string()))?;
    if !target.dtype().is_primitive_numeric() {
        return Err(AnalysisError::NonNumericColumn {
            column: target_column.to_string(),
            dtype: target.dtype().to_string(),
        });
    }

    Ok(df)
}

/// Load the configured dataset, or generate the synthetic table when that fails.
///
/// Load failures never reach the caller: they are logged and recorded in the
/// returned [`DataSource`]. The synthetic table only carries `SalePrice`, so a
/// different target with an unreadable file is a [`AnalysisError::TargetMissing`].
pub fn load_or_generate(config: &AnalysisConfig) -> Result<(DataFrame, DataSource)> {
    match load_dataset(
        &config.data_path,
        &config.target_column,
        config.schema_length(),
    ) {
        Ok(df) => {
            info!(
                path = %config.data_path.display(),
                rows = df.height(),
                columns = df.width(),
                "Loaded dataset"
            );
            Ok((
                df,
                DataSource::File {
                    path: config.data_path.clone(),
                },
            ))
        }
        Err(e) => {
            warn!(
                path = %config.data_path.display(),
                error = %e,
                "Error loading data, generating synthetic dataset"
            );
            let df = generate_synthetic_table(config.synthetic_rows, config.seed)?;
            if df.column(&config.target_column).is_err() {
                error!(
                    target = %config.target_column,
                    "Synthetic dataset has no such target column"
                );
                return Err(AnalysisError::TargetMissing(config.target_column.clone()));
            }
            Ok((
                df,
                DataSource::Synthetic {
                    rows: config.synthetic_rows,
                    seed: config.seed,
                    reason: e.to_string(),
                },
            ))
        }
    }
}
