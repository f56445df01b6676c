//! Run summary table

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::PipelineReport;

/// Before/after figures of one pipeline run
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PipelineSummary {
    pub rows_before: usize,
    pub rows_after: usize,
    pub features_before: usize,
    pub features_after: usize,
    pub outliers_removed: usize,
    pub boundary: String,
    pub source: String,
    pub total_time: Duration,
}

impl PipelineSummary {
    pub fn from_report(report: &PipelineReport, source: impl Into<String>, total_time: Duration) -> Self {
        Self {
            rows_before: report.initial_summary.total_houses,
            rows_after: report.final_summary.total_houses,
            features_before: report.feature_info.original_features,
            features_after: report.feature_info.final_features,
            outliers_removed: report.outlier_info.outliers_removed,
            boundary: report.outlier_info.boundary.clone(),
            source: source.into(),
            total_time,
        }
    }

    /// Share of columns removed by feature pruning, in percent
    pub fn feature_reduction_pct(&self) -> f64 {
        if self.features_before > 0 {
            (self.features_before - self.features_after) as f64 / self.features_before as f64 * 100.0
        } else {
            0.0
        }
    }

    fn table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Before").add_attribute(Attribute::Bold),
            Cell::new("After").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("🏠 Houses"),
            Cell::new(self.rows_before),
            Cell::new(self.rows_after).fg(Color::Green),
        ]);

        table.add_row(vec![
            Cell::new("📁 Features"),
            Cell::new(self.features_before),
            Cell::new(self.features_after)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("✂️  Outliers Removed"),
            Cell::new(""),
            Cell::new(self.outliers_removed).fg(if self.outliers_removed == 0 {
                Color::White
            } else {
                Color::Red
            }),
        ]);

        table.add_row(vec![
            Cell::new("📈 Price Boundary"),
            Cell::new(""),
            Cell::new(&self.boundary).fg(Color::Cyan),
        ]);

        let reduction_pct = self.feature_reduction_pct();
        let color = if reduction_pct > 30.0 {
            Color::Green
        } else if reduction_pct > 10.0 {
            Color::Yellow
        } else {
            Color::Cyan
        };

        table.add_row(vec![
            Cell::new("📉 Feature Reduction"),
            Cell::new(""),
            Cell::new(format!("{:.1}%", reduction_pct))
                .fg(color)
                .add_attribute(Attribute::Bold),
        ]);

        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("PIPELINE SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!("      Source: {}", style(&self.source).cyan());
        println!();

        // Indent the table
        for line in self.table().to_string().lines() {
            println!("    {}", line);
        }

        println!();
        println!(
            "      {} {}",
            style("Total time:").dim(),
            style(format!("{:.2}s", self.total_time.as_secs_f64())).bold()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> PipelineSummary {
        PipelineSummary {
            rows_before: 1460,
            rows_after: 1448,
            features_before: 38,
            features_after: 7,
            outliers_removed: 12,
            boundary: "$340,000".to_string(),
            source: "data.csv".to_string(),
            total_time: Duration::from_millis(250),
        }
    }

    #[test]
    fn test_feature_reduction_pct() {
        let pct = summary().feature_reduction_pct();
        assert!((pct - 31.0 / 38.0 * 100.0).abs() < 1e-9);
        assert_eq!(PipelineSummary::default().feature_reduction_pct(), 0.0);
    }

    #[test]
    fn test_table_lists_counts() {
        let rendered = summary().table().to_string();
        assert!(rendered.contains("1460"));
        assert!(rendered.contains("1448"));
        assert!(rendered.contains("$340,000"));
        assert!(rendered.contains("81.6%"));
    }
}
