//! IQR-based removal of extreme target values

use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

use super::error::Result;
use super::stats::{self, Quartiles};
use crate::utils::format_currency;

/// Result of one outlier-removal pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierReport {
    pub original_count: usize,
    pub outliers_removed: usize,
    pub final_count: usize,
    pub boundary: String,
    pub q1: String,
    pub q3: String,
    pub iqr: String,
}

/// Upper removal boundary of a target column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierBoundary {
    pub quartiles: Quartiles,
    pub boundary: f64,
}

impl OutlierBoundary {
    /// `Q3 + fence * IQR` over the present values
    pub fn from_values(values: &[f64], fence: f64) -> Self {
        let quartiles = Quartiles::from_values(values);
        let boundary = quartiles.q3 + fence * quartiles.iqr();
        Self { quartiles, boundary }
    }
}

/// Remove every row whose `target_column` value exceeds `Q3 + fence * IQR`.
///
/// Rows with a missing target are kept. The boundary is derived from the table
/// passed in, so repeated passes recompute it from already-filtered data.
pub fn remove_outliers(
    df: &DataFrame,
    target_column: &str,
    fence: f64,
) -> Result<(DataFrame, OutlierReport)> {
    let original_count = df.height();
    let values = stats::column_values(df, target_column)?;
    let present: Vec<f64> = values.iter().flatten().copied().collect();

    let OutlierBoundary {
        quartiles,
        boundary,
    } = OutlierBoundary::from_values(&present, fence);

    // Keep rows at or below the boundary, and rows without a value
    let mask_values: Vec<bool> = values
        .iter()
        .map(|v| v.map_or(true, |x| x <= boundary))
        .collect();
    let mask = BooleanChunked::from_slice("mask".into(), &mask_values);
    let filtered = df.filter(&mask)?;

    let final_count = filtered.height();
    let outliers_removed = original_count - final_count;
    debug!(
        boundary,
        q1 = quartiles.q1,
        q3 = quartiles.q3,
        removed = outliers_removed,
        "Removed target outliers"
    );

    let report = OutlierReport {
        original_count,
        outliers_removed,
        final_count,
        boundary: format_currency(boundary),
        q1: format_currency(quartiles.q1),
        q3: format_currency(quartiles.q3),
        iqr: format_currency(quartiles.iqr()),
    };

    Ok((filtered, report))
}
