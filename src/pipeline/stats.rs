//! Descriptive statistics over plain `f64` slices and numeric table columns

use polars::prelude::*;

use super::error::{AnalysisError, Result};

/// Read a numeric column as `f64` values, mapping nulls and NaNs to `None`.
///
/// Row positions are preserved so the result can be zipped with other columns.
pub fn column_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = df
        .column(name)
        .map_err(|_| AnalysisError::FeatureNotFound(name.to_string()))?;

    if !column.dtype().is_primitive_numeric() {
        return Err(AnalysisError::NonNumericColumn {
            column: name.to_string(),
            dtype: column.dtype().to_string(),
        });
    }

    let casted = column.cast(&DataType::Float64)?;
    let values = casted
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect();

    Ok(values)
}

/// Read a numeric column and keep only the present values, in row order.
pub fn present_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    Ok(column_values(df, name)?.into_iter().flatten().collect())
}

/// Sort a copy of the values ascending.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Percentile of already-sorted values using linear interpolation between the
/// closest ranks (position `(n - 1) * q`).
///
/// Returns NaN for an empty slice. `q` is a fraction in `[0, 1]`.
pub fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted[0];
    }

    let position = (n - 1) as f64 * q.clamp(0.0, 1.0);
    let lower = position.floor() as usize;
    let upper = (lower + 1).min(n - 1);
    let fraction = position - lower as f64;

    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Percentile of unsorted values (see [`percentile_sorted`]).
pub fn percentile(values: &[f64], q: f64) -> f64 {
    percentile_sorted(&sorted(values), q)
}

/// Arithmetic mean; NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median via the linear 0.5 percentile.
pub fn median(values: &[f64]) -> f64 {
    percentile(values, 0.5)
}

/// Standard deviation with `ddof` delta degrees of freedom.
///
/// `ddof = 1` gives the sample estimate, `ddof = 0` the population one. NaN when
/// there are not more than `ddof` values.
pub fn std_dev(values: &[f64], ddof: usize) -> f64 {
    let n = values.len();
    if n <= ddof {
        return f64::NAN;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|x| (x - m).powi(2)).sum();
    (sum_sq / (n - ddof) as f64).sqrt()
}

/// Smallest value; NaN for an empty slice.
pub fn min(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::min).unwrap_or(f64::NAN)
}

/// Largest value; NaN for an empty slice.
pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(f64::NAN)
}

/// Quartiles of a column's values under the linear percentile method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
}

impl Quartiles {
    pub fn from_values(values: &[f64]) -> Self {
        let sorted = sorted(values);
        Self {
            q1: percentile_sorted(&sorted, 0.25),
            q2: percentile_sorted(&sorted, 0.5),
            q3: percentile_sorted(&sorted, 0.75),
        }
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// `(Q1 - fence * IQR, Q3 + fence * IQR)`
    pub fn fences(&self, fence: f64) -> (f64, f64) {
        let iqr = self.iqr();
        (self.q1 - fence * iqr, self.q3 + fence * iqr)
    }
}
