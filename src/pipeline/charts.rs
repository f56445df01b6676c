//! Chart data: price histogram, feature-vs-price scatter, price box plot
//!
//! These are read-only views of the table; none of them changes it.

use polars::prelude::DataFrame;
use serde::Serialize;

use super::error::{AnalysisError, Result};
use super::stats::{self, Quartiles};

/// Equal-width histogram
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub counts: Vec<usize>,
    /// Bin centers
    pub bins: Vec<f64>,
    pub bin_edges: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceStats {
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation (N)
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceDistribution {
    pub prices: Vec<f64>,
    pub histogram: Histogram,
    pub stats: PriceStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterData {
    pub x_data: Vec<f64>,
    pub y_data: Vec<f64>,
    pub feature_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Whiskers {
    pub lower: f64,
    pub upper: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlotData {
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub outliers: Vec<f64>,
    pub whiskers: Whiskers,
}

/// Bin `values` into `bins` equal-width bins spanning their range.
///
/// The last bin is closed on the right so the maximum is counted. A zero-width
/// range is widened to `[v - 0.5, v + 0.5]`, an empty input uses `[0, 1]`.
pub fn histogram(values: &[f64], bins: usize) -> Histogram {
    let bins = bins.max(1);
    let (mut lo, mut hi) = if values.is_empty() {
        (0.0, 1.0)
    } else {
        (stats::min(values), stats::max(values))
    };
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = hi - lo;
    let bin_edges: Vec<f64> = (0..=bins)
        .map(|i| lo + width * i as f64 / bins as f64)
        .collect();

    let mut counts = vec![0usize; bins];
    for &v in values {
        let mut idx = (((v - lo) / width) * bins as f64) as usize;
        if idx >= bins {
            idx = bins - 1;
        }
        // Float error can put a value on the wrong side of an edge
        if idx > 0 && v < bin_edges[idx] {
            idx -= 1;
        } else if idx + 1 < bins && v >= bin_edges[idx + 1] {
            idx += 1;
        }
        counts[idx] += 1;
    }

    let centers = bin_edges
        .windows(2)
        .map(|w| (w[0] + w[1]) / 2.0)
        .collect();

    Histogram {
        counts,
        bins: centers,
        bin_edges,
    }
}

/// Histogram and moments of the target column
pub fn price_distribution(
    df: &DataFrame,
    target_column: &str,
    bins: usize,
) -> Result<PriceDistribution> {
    let prices = stats::present_values(df, target_column)?;
    if prices.is_empty() {
        return Err(AnalysisError::NoData);
    }

    let stats = PriceStats {
        mean: stats::mean(&prices),
        median: stats::median(&prices),
        std: stats::std_dev(&prices, 0),
        min: stats::min(&prices),
        max: stats::max(&prices),
    };

    Ok(PriceDistribution {
        histogram: histogram(&prices, bins),
        prices,
        stats,
    })
}

/// Paired `(feature, target)` values with incomplete rows removed
pub fn scatter_data(df: &DataFrame, feature: &str, target_column: &str) -> Result<ScatterData> {
    if df.column(feature).is_err() {
        return Err(AnalysisError::FeatureNotFound(feature.to_string()));
    }

    let x = stats::column_values(df, feature)?;
    let y = stats::column_values(df, target_column).map_err(|e| match e {
        AnalysisError::FeatureNotFound(name) => AnalysisError::TargetMissing(name),
        other => other,
    })?;

    let (x_data, y_data): (Vec<f64>, Vec<f64>) = x
        .into_iter()
        .zip(y)
        .filter_map(|pair| match pair {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        })
        .unzip();

    Ok(ScatterData {
        x_data,
        y_data,
        feature_name: feature.to_string(),
    })
}

/// Quartiles, `fence * IQR` bounds, outliers and whiskers of the target column.
///
/// Whiskers are the most extreme values inside the bounds, not the bounds.
pub fn box_plot(df: &DataFrame, target_column: &str, fence: f64) -> Result<BoxPlotData> {
    let prices = stats::present_values(df, target_column)?;
    if prices.is_empty() {
        return Err(AnalysisError::NoData);
    }

    let quartiles = Quartiles::from_values(&prices);
    let (lower_bound, upper_bound) = quartiles.fences(fence);

    let outliers: Vec<f64> = prices
        .iter()
        .copied()
        .filter(|&p| p < lower_bound || p > upper_bound)
        .collect();

    let lower: Vec<f64> = prices.iter().copied().filter(|&p| p >= lower_bound).collect();
    let upper: Vec<f64> = prices.iter().copied().filter(|&p| p <= upper_bound).collect();

    Ok(BoxPlotData {
        q1: quartiles.q1,
        q2: quartiles.q2,
        q3: quartiles.q3,
        iqr: quartiles.iqr(),
        lower_bound,
        upper_bound,
        outliers,
        whiskers: Whiskers {
            lower: stats::min(&lower),
            upper: stats::max(&upper),
        },
    })
}
