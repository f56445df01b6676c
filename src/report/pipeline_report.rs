//! Exports of a finished run: the JSON run report and the cleaned table
//!
//! The run report wraps the [`PipelineReport`] with metadata about how the run
//! was configured and how long each step took.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use polars::prelude::*;
use serde::Serialize;

use crate::pipeline::{AnalysisSession, DataSource, PipelineReport, StepTimings};

/// Describes the run that produced a report
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub timestamp: String,
    pub housestat_version: String,
    pub input_file: String,
    pub data_source: Option<DataSource>,
    pub target_column: String,
    pub removal_fence: f64,
    pub box_plot_fence: f64,
    pub seed: u64,
}

/// Per-step wall-clock time in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimingsMs {
    pub load: f64,
    pub initial_summary: f64,
    pub missing: f64,
    pub correlation: f64,
    pub outliers: f64,
    pub features: f64,
    pub final_summary: f64,
    pub total: f64,
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

impl From<&StepTimings> for TimingsMs {
    fn from(t: &StepTimings) -> Self {
        Self {
            load: millis(t.load),
            initial_summary: millis(t.initial_summary),
            missing: millis(t.missing),
            correlation: millis(t.correlation),
            outliers: millis(t.outliers),
            features: millis(t.features),
            final_summary: millis(t.final_summary),
            total: millis(t.total()),
        }
    }
}

/// Complete JSON run report
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub metadata: ReportMetadata,
    pub report: PipelineReport,
    pub timings_ms: TimingsMs,
}

impl RunReport {
    /// Build the report for a session that has just finished `run_pipeline`.
    pub fn new(session: &AnalysisSession, report: PipelineReport) -> Self {
        let config = session.config();
        Self {
            metadata: ReportMetadata {
                timestamp: Utc::now().to_rfc3339(),
                housestat_version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: config.data_path.display().to_string(),
                data_source: session.source().cloned(),
                target_column: config.target_column.clone(),
                removal_fence: config.removal_fence,
                box_plot_fence: config.box_plot_fence,
                seed: config.seed,
            },
            report,
            timings_ms: TimingsMs::from(session.timings()),
        }
    }
}

/// Write the run report as pretty-printed JSON.
pub fn export_run_report(report: &RunReport, output_path: &Path) -> Result<()> {
    let json =
        serde_json::to_string_pretty(report).context("Failed to serialize run report to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write run report to {}", output_path.display()))?;

    Ok(())
}

/// Save dataset to file (CSV or Parquet based on extension)
pub fn save_dataset(df: &mut DataFrame, path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "csv" => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            CsvWriter::new(&mut file)
                .finish(df)
                .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
        }
        "parquet" => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            ParquetWriter::new(file)
                .finish(df)
                .with_context(|| format!("Failed to write Parquet file: {}", path.display()))?;
        }
        _ => anyhow::bail!(
            "Unsupported output format: {}. Supported formats: csv, parquet",
            extension
        ),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timings_convert_to_millis() {
        let timings = StepTimings {
            load: Duration::from_millis(10),
            correlation: Duration::from_millis(5),
            ..Default::default()
        };
        let ms = TimingsMs::from(&timings);
        assert!((ms.load - 10.0).abs() < 1e-9);
        assert!((ms.total - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_save_rejects_unknown_extension() {
        let mut df = df!("SalePrice" => [1.0, 2.0]).unwrap();
        let err = save_dataset(&mut df, Path::new("out.xlsx")).unwrap_err();
        assert!(err.to_string().contains("Unsupported output format"));
    }
}
