//! Missing value analysis

use polars::prelude::*;
use serde::Serialize;

use super::error::Result;
use crate::utils::round_to;

/// Missing-value count of one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingEntry {
    pub feature: String,
    pub missing: usize,
    /// `100 * missing / rows`, rounded to one decimal
    pub percentage: f64,
}

/// Count nulls per column. Float NaNs count as missing.
fn count_missing(column: &Column) -> Result<usize> {
    let count = match column.dtype() {
        DataType::Float32 | DataType::Float64 => {
            let casted = column.cast(&DataType::Float64)?;
            casted
                .f64()?
                .into_iter()
                .filter(|v| v.map_or(true, |x| x.is_nan()))
                .count()
        }
        _ => column.null_count(),
    };
    Ok(count)
}

/// Analyze missing values in the dataset.
///
/// Only columns with at least one missing value are reported, sorted by count
/// descending. Ties keep column order.
pub fn analyze_missing_values(df: &DataFrame) -> Result<Vec<MissingEntry>> {
    // Handle empty DataFrame
    let rows = df.height();
    if rows == 0 {
        return Ok(Vec::new());
    }

    let mut entries: Vec<MissingEntry> = Vec::new();

    for column in df.get_columns() {
        let missing = count_missing(column)?;
        if missing == 0 {
            continue;
        }

        entries.push(MissingEntry {
            feature: column.name().to_string(),
            missing,
            percentage: round_to(missing as f64 / rows as f64 * 100.0, 1),
        });
    }

    // Stable sort keeps column order among equal counts
    entries.sort_by(|a, b| b.missing.cmp(&a.missing));

    Ok(entries)
}
