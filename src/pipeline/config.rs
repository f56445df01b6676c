//! Analysis configuration
//!
//! Every constant the pipeline depends on lives here with a named default, so a
//! JSON config file or the CLI can override it without touching the pipeline.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{AnalysisError, Result};

/// Default target column
pub const TARGET_COLUMN: &str = "SalePrice";

/// Default feature for scatter plots when the caller names none
pub const DEFAULT_SCATTER_FEATURE: &str = "OverallQual";

/// Seed of the synthetic fallback table
pub const DEFAULT_SEED: u64 = 42;

/// Row count of the synthetic fallback table
pub const SYNTHETIC_ROWS: usize = 1460;

/// IQR multiplier for the row-removal boundary (`Q3 + 3 * IQR`).
/// Only the extreme tail of the target is cleaned.
pub const REMOVAL_FENCE: f64 = 3.0;

/// IQR multiplier for box-plot outlier bounds (`Q1 - 1.5 * IQR`, `Q3 + 1.5 * IQR`).
pub const BOX_PLOT_FENCE: f64 = 1.5;

/// Number of equal-width bins in the price histogram
pub const HISTOGRAM_BINS: usize = 20;

/// Length of the ranked correlation list
pub const TOP_FEATURES: usize = 10;

/// Columns removed by feature engineering, in removal order.
pub const PRUNED_FEATURES: [&str; 31] = [
    "BsmtFinSF1",
    "LotFrontage",
    "WoodDeckSF",
    "2ndFlrSF",
    "OpenPorchSF",
    "HalfBath",
    "LotArea",
    "BsmtFullBath",
    "BsmtUnfSF",
    "BedroomAbvGr",
    "ScreenPorch",
    "PoolArea",
    "MoSold",
    "3SsnPorch",
    "BsmtHalfBath",
    "MiscVal",
    "Id",
    "LowQualFinSF",
    "YrSold",
    "OverallCond",
    "MSSubClass",
    "EnclosedPorch",
    "KitchenAbvGr",
    "FireplaceQu",
    "Fence",
    "Alley",
    "MiscFeature",
    "PoolQC",
    "GarageCars",
    "1stFlrSF",
    "FullBath",
];

/// Configuration for an [`crate::pipeline::AnalysisSession`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Tabular source tried before falling back to synthetic data.
    /// Default: "data.csv"
    pub data_path: PathBuf,

    /// Numeric column that correlations and outliers are measured against.
    /// Default: "SalePrice"
    pub target_column: String,

    /// Seed for the synthetic fallback table.
    /// Default: 42
    pub seed: u64,

    /// Row count of the synthetic fallback table.
    /// Default: 1460
    pub synthetic_rows: usize,

    /// Rows used for CSV schema inference (0 = full scan).
    /// Default: 10000
    pub infer_schema_length: usize,

    /// Bins in the price histogram.
    /// Default: 20
    pub histogram_bins: usize,

    /// IQR multiplier for removing target outliers.
    /// Default: 3.0
    pub removal_fence: f64,

    /// IQR multiplier for box-plot outlier bounds.
    /// Default: 1.5
    pub box_plot_fence: f64,

    /// Length of the ranked correlation list.
    /// Default: 10
    pub top_features: usize,

    /// Scatter feature used when none is requested.
    /// Default: "OverallQual"
    pub default_scatter_feature: String,

    /// Columns dropped by feature engineering.
    /// Default: [`PRUNED_FEATURES`]
    pub pruned_features: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data.csv"),
            target_column: TARGET_COLUMN.to_string(),
            seed: DEFAULT_SEED,
            synthetic_rows: SYNTHETIC_ROWS,
            infer_schema_length: 10_000,
            histogram_bins: HISTOGRAM_BINS,
            removal_fence: REMOVAL_FENCE,
            box_plot_fence: BOX_PLOT_FENCE,
            top_features: TOP_FEATURES,
            default_scatter_feature: DEFAULT_SCATTER_FEATURE.to_string(),
            pruned_features: PRUNED_FEATURES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AnalysisConfig {
    /// Read a JSON config file. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.target_column.trim().is_empty() {
            return Err(AnalysisError::InvalidConfig(
                "target_column must not be empty".to_string(),
            ));
        }

        if self.synthetic_rows == 0 {
            return Err(AnalysisError::InvalidConfig(
                "synthetic_rows must be at least 1".to_string(),
            ));
        }

        if self.histogram_bins == 0 {
            return Err(AnalysisError::InvalidConfig(
                "histogram_bins must be at least 1".to_string(),
            ));
        }

        if self.top_features == 0 {
            return Err(AnalysisError::InvalidConfig(
                "top_features must be at least 1".to_string(),
            ));
        }

        for (field, value) in [
            ("removal_fence", self.removal_fence),
            ("box_plot_fence", self.box_plot_fence),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(AnalysisError::InvalidConfig(format!(
                    "{} must be a positive number, got {}",
                    field, value
                )));
            }
        }

        if self.pruned_features.contains(&self.target_column) {
            return Err(AnalysisError::InvalidConfig(format!(
                "pruned_features must not contain the target column '{}'",
                self.target_column
            )));
        }

        Ok(())
    }

    /// Schema inference length as polars expects it (`None` = full scan).
    pub fn schema_length(&self) -> Option<usize> {
        if self.infer_schema_length == 0 {
            None
        } else {
            Some(self.infer_schema_length)
        }
    }
}
