//! Pearson correlation matrix and target correlation ranking

use faer::Mat;
use polars::prelude::*;
use rayon::prelude::*;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::debug;

use super::error::{AnalysisError, Result};
use super::stats;
use crate::utils::round_to;

/// Threshold for auto-selecting matrix vs pairwise correlation computation.
/// Matrix multiplication is more efficient when there are many columns.
const MATRIX_METHOD_COLUMN_THRESHOLD: usize = 15;

/// Decimal places kept in reported correlations
const CORRELATION_DECIMALS: i32 = 3;

/// Feature ranked by its correlation with the target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCorrelation {
    pub name: String,
    pub correlation: f64,
}

/// Symmetric correlation matrix over the numeric columns, in table order.
///
/// Undefined entries (constant columns, fewer than two complete pairs) are NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    values: Vec<f64>,
}

impl CorrelationMatrix {
    fn filled(columns: Vec<String>, value: f64) -> Self {
        let n = columns.len();
        Self {
            columns,
            values: vec![value; n * n],
        }
    }

    fn set(&mut self, i: usize, j: usize, value: f64) {
        let n = self.columns.len();
        self.values[i * n + j] = value;
        self.values[j * n + i] = value;
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Unrounded coefficient at `(i, j)`
    pub fn value(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.columns.len() + j]
    }

    /// Unrounded coefficient between two named columns
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        Some(self.value(self.index_of(a)?, self.index_of(b)?))
    }
}

/// Serializes as `{column: {row: value}}` with values rounded to 3 decimals and
/// undefined entries as `null`.
impl Serialize for CorrelationMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        struct Row<'a> {
            matrix: &'a CorrelationMatrix,
            column: usize,
        }

        impl Serialize for Row<'_> {
            fn serialize<S: Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.matrix.len()))?;
                for (i, name) in self.matrix.columns.iter().enumerate() {
                    let v = self.matrix.value(i, self.column);
                    let rounded = (!v.is_nan()).then(|| round_to(v, CORRELATION_DECIMALS));
                    map.serialize_entry(name, &rounded)?;
                }
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (j, name) in self.columns.iter().enumerate() {
            map.serialize_entry(name, &Row { matrix: self, column: j })?;
        }
        map.end()
    }
}

/// Correlation output: ranked target correlations plus the full matrix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationReport {
    pub top_features: Vec<FeatureCorrelation>,
    pub correlation_matrix: CorrelationMatrix,
}

/// Numeric columns as `f64`, with nulls and NaNs as `None`
fn numeric_columns(df: &DataFrame) -> Result<Vec<(String, Vec<Option<f64>>)>> {
    df.get_columns()
        .iter()
        .filter(|col| col.dtype().is_primitive_numeric())
        .map(|col| {
            let name = col.name().to_string();
            let values = stats::column_values(df, &name)?;
            Ok((name, values))
        })
        .collect()
}

/// A column is constant when all its present values are equal (or none exist).
fn is_constant(values: &[Option<f64>]) -> bool {
    let mut present = values.iter().flatten();
    match present.next() {
        Some(first) => present.all(|v| v == first),
        None => true,
    }
}

/// Pearson correlation over pairwise-complete observations using Welford's
/// single-pass algorithm.
///
/// Returns NaN when fewer than two complete pairs exist or either side has zero
/// variance.
pub fn pearson_correlation(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let mut n = 0.0;
    let mut mean_x = 0.0;
    let mut mean_y = 0.0;
    let mut m2_x = 0.0;
    let mut m2_y = 0.0;
    let mut cov_xy = 0.0;
    let mut first: Option<(f64, f64)> = None;
    let mut varies_x = false;
    let mut varies_y = false;

    for (a, b) in x.iter().zip(y.iter()) {
        if let (Some(a), Some(b)) = (*a, *b) {
            match first {
                None => first = Some((a, b)),
                Some((fa, fb)) => {
                    varies_x |= a != fa;
                    varies_y |= b != fb;
                }
            }

            n += 1.0;
            let dx = a - mean_x;
            let dy = b - mean_y;
            mean_x += dx / n;
            mean_y += dy / n;
            m2_x += dx * (a - mean_x);
            m2_y += dy * (b - mean_y);
            cov_xy += dx * (b - mean_y);
        }
    }

    if n < 2.0 || !varies_x || !varies_y {
        return f64::NAN;
    }

    (cov_xy / (m2_x.sqrt() * m2_y.sqrt())).clamp(-1.0, 1.0)
}

/// Correlation matrix from independent pairwise computations, run in parallel.
fn correlation_matrix_pairwise(columns: &[(String, Vec<Option<f64>>)]) -> CorrelationMatrix {
    let n = columns.len();
    let names: Vec<String> = columns.iter().map(|(name, _)| name.clone()).collect();
    let mut matrix = CorrelationMatrix::filled(names, f64::NAN);

    // Generate all pairs (indices for upper triangle)
    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .collect();

    let coefficients: Vec<(usize, usize, f64)> = pairs
        .par_iter()
        .map(|&(i, j)| (i, j, pearson_correlation(&columns[i].1, &columns[j].1)))
        .collect();

    for (i, j, c) in coefficients {
        matrix.set(i, j, c);
    }
    for (i, (_, values)) in columns.iter().enumerate() {
        let defined = values.iter().flatten().count() >= 2 && !is_constant(values);
        matrix.set(i, i, if defined { 1.0 } else { f64::NAN });
    }

    matrix
}

/// Compute correlation matrix using matrix operations (much faster for many columns).
///
/// Only valid when no column has missing values. Algorithm:
/// 1. Center each column and scale it to unit norm: `z = (x - mean) / ||x - mean||`
/// 2. `R = Z^T * Z`
///
/// Constant columns are left out of `Z` and get NaN rows/columns.
fn correlation_matrix_fast(columns: &[(String, Vec<Option<f64>>)]) -> CorrelationMatrix {
    let names: Vec<String> = columns.iter().map(|(name, _)| name.clone()).collect();
    let mut matrix = CorrelationMatrix::filled(names, f64::NAN);

    let n_rows = columns.first().map_or(0, |(_, v)| v.len());
    if n_rows < 2 {
        return matrix;
    }

    // Standardize every non-constant column in parallel
    let standardized: Vec<(usize, Vec<f64>)> = columns
        .par_iter()
        .enumerate()
        .filter(|(_, (_, values))| !is_constant(values))
        .map(|(idx, (_, values))| {
            let present: Vec<f64> = values.iter().flatten().copied().collect();
            let mean = stats::mean(&present);
            let norm = present
                .iter()
                .map(|x| (x - mean).powi(2))
                .sum::<f64>()
                .sqrt();
            let z = present.iter().map(|x| (x - mean) / norm).collect();
            (idx, z)
        })
        .collect();

    let n_valid = standardized.len();
    if n_valid == 0 {
        return matrix;
    }

    // Build the standardized data matrix Z (n_rows x n_valid)
    let mut z = Mat::<f64>::zeros(n_rows, n_valid);
    for (col_idx, (_, col_data)) in standardized.iter().enumerate() {
        for (row_idx, &val) in col_data.iter().enumerate() {
            z[(row_idx, col_idx)] = val;
        }
    }

    let corr = z.transpose() * &z;

    for a in 0..n_valid {
        let i = standardized[a].0;
        matrix.set(i, i, 1.0);
        for b in (a + 1)..n_valid {
            let j = standardized[b].0;
            matrix.set(i, j, corr[(a, b)].clamp(-1.0, 1.0));
        }
    }

    matrix
}

/// Compute the Pearson correlation matrix of every numeric column in `df`.
///
/// Automatically chooses the most efficient method:
/// - Matrix method: no missing values and at least 15 numeric columns
/// - Pairwise method: otherwise (handles missing values pair by pair)
pub fn compute_correlation_matrix(df: &DataFrame) -> Result<CorrelationMatrix> {
    let columns = numeric_columns(df)?;
    let complete = columns
        .iter()
        .all(|(_, values)| values.iter().all(Option::is_some));

    let matrix = if complete && columns.len() >= MATRIX_METHOD_COLUMN_THRESHOLD {
        debug!(columns = columns.len(), "Computing correlation matrix (matrix method)");
        correlation_matrix_fast(&columns)
    } else {
        debug!(columns = columns.len(), "Computing correlation matrix (pairwise method)");
        correlation_matrix_pairwise(&columns)
    };

    Ok(matrix)
}

/// Rank features by correlation with `target`, strongest positive first.
///
/// The target itself and undefined correlations are skipped before the list is
/// truncated to `top_n`; coefficients are rounded last.
pub fn rank_target_correlations(
    matrix: &CorrelationMatrix,
    target: &str,
    top_n: usize,
) -> Vec<FeatureCorrelation> {
    let Some(t) = matrix.index_of(target) else {
        return Vec::new();
    };

    let mut ranked: Vec<(usize, f64)> = (0..matrix.len())
        .filter(|&j| j != t)
        .map(|j| (j, matrix.value(t, j)))
        .filter(|(_, c)| !c.is_nan())
        .collect();

    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(top_n);

    ranked
        .into_iter()
        .map(|(j, c)| FeatureCorrelation {
            name: matrix.columns()[j].clone(),
            correlation: round_to(c, CORRELATION_DECIMALS),
        })
        .collect()
}

/// Build the full correlation report for `target_column`.
pub fn correlation_report(
    df: &DataFrame,
    target_column: &str,
    top_n: usize,
) -> Result<CorrelationReport> {
    // Fails early with a precise error when the target is absent or not numeric
    stats::column_values(df, target_column).map_err(|e| match e {
        AnalysisError::FeatureNotFound(name) => AnalysisError::TargetMissing(name),
        other => other,
    })?;

    let correlation_matrix = compute_correlation_matrix(df)?;
    let top_features = rank_target_correlations(&correlation_matrix, target_column, top_n);

    Ok(CorrelationReport {
        top_features,
        correlation_matrix,
    })
}
