//! Analysis session: owns the working table and runs the pipeline steps
//!
//! Every operation reads the session's current table. Only
//! [`AnalysisSession::remove_outliers`] and [`AnalysisSession::remove_features`]
//! replace it, and both need `&mut self`.

use std::time::{Duration, Instant};

use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::info;

use super::charts::{self, BoxPlotData, PriceDistribution, ScatterData};
use super::config::AnalysisConfig;
use super::correlation::{self, CorrelationReport};
use super::error::{AnalysisError, Result};
use super::features::{self, FeatureReport};
use super::loader::{self, DataSource};
use super::missing::{self, MissingEntry};
use super::outliers::{self, OutlierReport};
use super::summary::{self, DataSummary};

/// Aggregate result of a full pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineReport {
    pub success: bool,
    pub initial_summary: DataSummary,
    pub missing_data: Vec<MissingEntry>,
    pub correlation_data: CorrelationReport,
    pub outlier_info: OutlierReport,
    pub feature_info: FeatureReport,
    pub final_summary: DataSummary,
}

/// Wall-clock time spent in each pipeline step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepTimings {
    pub load: Duration,
    pub initial_summary: Duration,
    pub missing: Duration,
    pub correlation: Duration,
    pub outliers: Duration,
    pub features: Duration,
    pub final_summary: Duration,
}

impl StepTimings {
    pub fn total(&self) -> Duration {
        self.load
            + self.initial_summary
            + self.missing
            + self.correlation
            + self.outliers
            + self.features
            + self.final_summary
    }
}

/// Run `step`, log its duration and store it in `slot`.
fn timed<T>(name: &str, slot: &mut Duration, step: impl FnOnce() -> Result<T>) -> Result<T> {
    let start = Instant::now();
    let value = step()?;
    *slot = start.elapsed();
    info!(step = name, elapsed_ms = slot.as_millis() as u64, "Pipeline step complete");
    Ok(value)
}

/// Holds the configuration, the working table and where it came from.
#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    config: AnalysisConfig,
    table: Option<DataFrame>,
    source: Option<DataSource>,
    timings: StepTimings,
}

impl AnalysisSession {
    /// Create a session with no table loaded.
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Create a session over an existing table.
    pub fn with_table(config: AnalysisConfig, table: DataFrame) -> Self {
        Self {
            config,
            table: Some(table),
            ..Default::default()
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn table(&self) -> Option<&DataFrame> {
        self.table.as_ref()
    }

    pub fn source(&self) -> Option<&DataSource> {
        self.source.as_ref()
    }

    /// Timings of the last [`AnalysisSession::run_pipeline`] call
    pub fn timings(&self) -> &StepTimings {
        &self.timings
    }

    fn target(&self) -> &str {
        &self.config.target_column
    }

    /// Load the configured dataset (or the synthetic fallback), replacing the
    /// current table.
    pub fn load(&mut self) -> Result<&DataSource> {
        let (df, source) = loader::load_or_generate(&self.config)?;
        self.table = Some(df);
        Ok(self.source.insert(source))
    }

    /// Summary statistics, or `None` without a table.
    pub fn data_summary(&self) -> Result<Option<DataSummary>> {
        self.table
            .as_ref()
            .map(|df| summary::compute_summary(df, self.target()))
            .transpose()
    }

    /// Missing-value report; empty without a table.
    pub fn missing_data(&self) -> Result<Vec<MissingEntry>> {
        match &self.table {
            Some(df) => missing::analyze_missing_values(df),
            None => Ok(Vec::new()),
        }
    }

    /// Correlation report, or `None` without a table.
    pub fn correlation(&self) -> Result<Option<CorrelationReport>> {
        self.table
            .as_ref()
            .map(|df| correlation::correlation_report(df, self.target(), self.config.top_features))
            .transpose()
    }

    /// Remove target outliers from the table, or `None` without a table.
    pub fn remove_outliers(&mut self) -> Result<Option<OutlierReport>> {
        let Some(df) = &self.table else {
            return Ok(None);
        };

        let (filtered, report) =
            outliers::remove_outliers(df, &self.config.target_column, self.config.removal_fence)?;
        self.table = Some(filtered);
        Ok(Some(report))
    }

    /// Drop the configured feature list from the table, or `None` without a table.
    pub fn remove_features(&mut self) -> Option<FeatureReport> {
        let df = self.table.as_ref()?;
        let (reduced, report) = features::remove_features(df, &self.config.pruned_features);
        self.table = Some(reduced);
        Some(report)
    }

    fn require_table(&self) -> Result<&DataFrame> {
        self.table.as_ref().ok_or(AnalysisError::NoData)
    }

    /// Histogram data of the target column
    pub fn price_distribution(&self) -> Result<PriceDistribution> {
        charts::price_distribution(
            self.require_table()?,
            self.target(),
            self.config.histogram_bins,
        )
    }

    /// Scatter pairs of `feature` (or the configured default) against the target
    pub fn scatter_data(&self, feature: Option<&str>) -> Result<ScatterData> {
        let df = self.require_table()?;
        let feature = feature.unwrap_or(self.config.default_scatter_feature.as_str());
        charts::scatter_data(df, feature, self.target())
    }

    /// Box-plot data of the target column
    pub fn box_plot(&self) -> Result<BoxPlotData> {
        charts::box_plot(
            self.require_table()?,
            self.target(),
            self.config.box_plot_fence,
        )
    }

    /// Run the whole pipeline from a fresh load.
    ///
    /// Order: load, summary, missing values, correlation, outlier removal,
    /// feature pruning, summary. The first failing step aborts the run.
    pub fn run_pipeline(&mut self) -> Result<PipelineReport> {
        let mut timings = StepTimings::default();

        timed("load", &mut timings.load, || self.load().map(|_| ()))?;

        let initial_summary = timed("initial_summary", &mut timings.initial_summary, || {
            self.data_summary()?.ok_or(AnalysisError::NoData)
        })?;
        let missing_data = timed("missing", &mut timings.missing, || self.missing_data())?;
        let correlation_data = timed("correlation", &mut timings.correlation, || {
            self.correlation()?.ok_or(AnalysisError::NoData)
        })?;
        let outlier_info = timed("outliers", &mut timings.outliers, || {
            self.remove_outliers()?.ok_or(AnalysisError::NoData)
        })?;
        let feature_info = timed("features", &mut timings.features, || {
            self.remove_features().ok_or(AnalysisError::NoData)
        })?;
        let final_summary = timed("final_summary", &mut timings.final_summary, || {
            self.data_summary()?.ok_or(AnalysisError::NoData)
        })?;

        self.timings = timings;
        info!(
            total_ms = timings.total().as_millis() as u64,
            rows = final_summary.total_houses,
            "Pipeline complete"
        );

        Ok(PipelineReport {
            success: true,
            initial_summary,
            missing_data,
            correlation_data,
            outlier_info,
            feature_info,
            final_summary,
        })
    }
}
