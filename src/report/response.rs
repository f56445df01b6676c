//! JSON payloads returned to consumers
//!
//! Every operation renders as its data, `{}` when there is nothing to report,
//! or `{"error": message}`.

use serde::Serialize;

use crate::pipeline::{AnalysisError, Result};

/// Untagged response envelope
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiResponse<T> {
    Data(T),
    Empty {},
    Error { error: String },
}

impl<T> ApiResponse<T> {
    pub fn error(message: impl Into<String>) -> Self {
        ApiResponse::Error {
            error: message.into(),
        }
    }

    /// `Ok(None)` renders as an empty object.
    pub fn from_optional(result: Result<Option<T>>) -> Self {
        match result {
            Ok(Some(value)) => ApiResponse::Data(value),
            Ok(None) => ApiResponse::Empty {},
            Err(e) => e.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ApiResponse::Error { .. })
    }
}

impl<T> From<Result<T>> for ApiResponse<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => ApiResponse::Data(value),
            Err(e) => e.into(),
        }
    }
}

impl<T> From<AnalysisError> for ApiResponse<T> {
    fn from(error: AnalysisError) -> Self {
        ApiResponse::error(error.to_string())
    }
}

/// Serialize `value` as pretty JSON, or on one line when `compact`.
pub fn to_json<T: Serialize>(value: &T, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}
