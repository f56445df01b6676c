//! Summary statistics of the target column and table shape

use polars::prelude::*;
use serde::Serialize;

use super::error::Result;
use super::stats;
use crate::utils::format_currency;

/// Aggregate statistics over the current table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSummary {
    pub total_houses: usize,
    pub avg_price: String,
    pub median_price: String,
    /// Sample standard deviation (N - 1)
    pub price_std: String,
    pub min_price: String,
    pub max_price: String,
    pub columns: Vec<String>,
    pub shape: (usize, usize),
}

/// Compute the summary of `df` against `target_column`.
///
/// Nulls and NaNs in the target are skipped by every statistic.
pub fn compute_summary(df: &DataFrame, target_column: &str) -> Result<DataSummary> {
    let prices = stats::present_values(df, target_column)?;

    Ok(DataSummary {
        total_houses: df.height(),
        avg_price: format_currency(stats::mean(&prices)),
        median_price: format_currency(stats::median(&prices)),
        price_std: format_currency(stats::std_dev(&prices, 1)),
        min_price: format_currency(stats::min(&prices)),
        max_price: format_currency(stats::max(&prices)),
        columns: df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect(),
        shape: df.shape(),
    })
}
