//! Error types for the analysis pipeline.
//!
//! Library code returns [`AnalysisError`]; the binary wraps it with `anyhow`
//! context. Errors that reach a JSON consumer are rendered as `{ "error": .. }`
//! by [`crate::report::ApiResponse`].

use thiserror::Error;

/// The main error type for the analysis pipeline.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// No table has been loaded into the session yet.
    #[error("No data available")]
    NoData,

    /// A requested feature is not a column of the current table.
    #[error("Feature {0} not found")]
    FeatureNotFound(String),

    /// A column that must be numeric holds some other type.
    #[error("Column '{column}' is not numeric (found {dtype})")]
    NonNumericColumn { column: String, dtype: String },

    /// The loaded table does not carry the target column.
    #[error("Target column '{0}' not found in dataset")]
    TargetMissing(String),

    /// The input file extension is not one the loader reads.
    #[error("Unsupported file format: '{0}'. Supported formats: csv, parquet")]
    UnsupportedFormat(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Synthetic table generation failed.
    #[error("Failed to generate synthetic data: {0}")]
    Synthetic(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Stable error code for machine consumers.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoData => "NO_DATA",
            Self::FeatureNotFound(_) => "FEATURE_NOT_FOUND",
            Self::NonNumericColumn { .. } => "NON_NUMERIC_COLUMN",
            Self::TargetMissing(_) => "TARGET_MISSING",
            Self::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Synthetic(_) => "SYNTHETIC_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
        }
    }

    /// Whether the error is a user-facing request problem rather than a failure
    /// of the pipeline itself.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::NoData | Self::FeatureNotFound(_) | Self::NonNumericColumn { .. }
        )
    }
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
