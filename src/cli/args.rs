//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::pipeline::{AnalysisConfig, Result};

/// Housestat - Summarize, clean and chart a house-sales dataset
#[derive(Parser, Debug)]
#[command(name = "housestat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Input file path (CSV or Parquet).
    /// Falls back to a synthetic dataset when the file cannot be loaded.
    /// Default: data.csv
    #[arg(short, long, global = true)]
    pub input: Option<PathBuf>,

    /// Target (price) column name. Default: SalePrice
    #[arg(short, long, global = true)]
    pub target: Option<String>,

    /// Seed of the synthetic fallback dataset. Default: 42
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Row count of the synthetic fallback dataset. Default: 1460
    #[arg(long, global = true, value_parser = validate_rows)]
    pub rows: Option<usize>,

    /// JSON configuration file. Command-line flags override its values.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan (very slow for large files).
    /// Default: 10000
    #[arg(long, global = true)]
    pub infer_schema_length: Option<usize>,

    /// Print JSON on a single line
    #[arg(long, global = true, default_value = "false")]
    pub compact: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true, default_value = "false", conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Summary statistics of the target column
    Summary,

    /// Missing-value count and percentage per column
    Missing,

    /// Top correlations with the target and the full correlation matrix
    Correlation,

    /// Price histogram and moments
    Distribution {
        /// Run the full pipeline first and chart the cleaned table
        #[arg(long, default_value = "false")]
        cleaned: bool,
    },

    /// Feature values paired with prices
    Scatter {
        /// Feature plotted against the target. Default: OverallQual
        #[arg(short, long)]
        feature: Option<String>,

        /// Run the full pipeline first and chart the cleaned table
        #[arg(long, default_value = "false")]
        cleaned: bool,
    },

    /// Remove extreme target values (Q3 + 3 x IQR) and report the result
    Outliers,

    /// Drop the pruned feature list and report the result
    Features,

    /// Quartiles, 1.5 x IQR bounds, outliers and whiskers of the target
    BoxPlot {
        /// Run the full pipeline first and chart the cleaned table
        #[arg(long, default_value = "false")]
        cleaned: bool,
    },

    /// Run the full pipeline (default)
    Run {
        /// Print the pipeline result as JSON instead of the styled run
        #[arg(long, default_value = "false")]
        json: bool,

        /// Write a JSON run report with metadata and step timings
        #[arg(long)]
        report: Option<PathBuf>,

        /// Save the cleaned table (CSV or Parquet, determined by extension)
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

impl Cli {
    /// The command to run; no subcommand means a styled full run.
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Run {
            json: false,
            report: None,
            save: None,
        })
    }

    /// Build the analysis configuration: defaults, then the config file, then flags.
    pub fn to_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_json_file(path)?,
            None => AnalysisConfig::default(),
        };

        if let Some(input) = &self.input {
            config.data_path = input.clone();
        }
        if let Some(target) = &self.target {
            config.target_column = target.clone();
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(rows) = self.rows {
            config.synthetic_rows = rows;
        }
        if let Some(length) = self.infer_schema_length {
            config.infer_schema_length = length;
        }

        config.validate()?;
        Ok(config)
    }

    /// Default log filter when `RUST_LOG` is unset
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

/// Validator for the synthetic row count
fn validate_rows(s: &str) -> std::result::Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid row count", s))?;

    if value == 0 {
        Err("rows must be at least 1".to_string())
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_run() {
        let cli = Cli::try_parse_from(["housestat"]).unwrap();
        assert_eq!(
            cli.command(),
            Commands::Run {
                json: false,
                report: None,
                save: None
            }
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["housestat", "summary", "--seed", "7", "--compact"]).unwrap();
        assert_eq!(cli.command(), Commands::Summary);
        assert_eq!(cli.seed, Some(7));
        assert!(cli.compact);
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "housestat",
            "-i",
            "houses.parquet",
            "--rows",
            "100",
            "--infer-schema-length",
            "0",
        ])
        .unwrap();
        let config = cli.to_config().unwrap();
        assert_eq!(config.data_path, PathBuf::from("houses.parquet"));
        assert_eq!(config.synthetic_rows, 100);
        assert_eq!(config.infer_schema_length, 0);
        assert_eq!(config.target_column, "SalePrice");
    }

    #[test]
    fn test_zero_rows_rejected() {
        assert!(Cli::try_parse_from(["housestat", "--rows", "0"]).is_err());
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["housestat", "-v", "-q"]).is_err());
        let cli = Cli::try_parse_from(["housestat", "-q"]).unwrap();
        assert_eq!(cli.log_level(), "warn");
    }

    #[test]
    fn test_box_plot_subcommand_name() {
        let cli = Cli::try_parse_from(["housestat", "box-plot", "--cleaned"]).unwrap();
        assert_eq!(cli.command(), Commands::BoxPlot { cleaned: true });
    }
}
