//! Housestat: House Price Analysis CLI Tool
//!
//! Loads a house-sales table (or a synthetic stand-in), reports statistics,
//! removes extreme prices and unused features, and emits chart data as JSON.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use housestat::cli::{Cli, Commands};
use housestat::pipeline::{AnalysisConfig, AnalysisSession, PipelineReport};
use housestat::report::{export_run_report, save_dataset, to_json, ApiResponse, PipelineSummary, RunReport};
use housestat::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_config, print_count, print_info, print_step_header, print_step_time, print_success,
    print_warning,
};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    let config = cli.to_config().context("Invalid configuration")?;
    debug!(?config, "Resolved configuration");

    match cli.command() {
        Commands::Run {
            json: false,
            report,
            save,
        } => run_styled(config, report.as_deref(), save.as_deref()),
        Commands::Run {
            json: true,
            report,
            save,
        } => run_json(config, report.as_deref(), save.as_deref(), cli.compact),
        command => run_command(config, command, cli.compact),
    }
}

/// Log to stderr so stdout only carries JSON. `RUST_LOG` takes precedence.
fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Print a response and map error payloads to a failing exit code.
fn emit<T: Serialize>(response: ApiResponse<T>, compact: bool) -> Result<ExitCode> {
    println!(
        "{}",
        to_json(&response, compact).context("Failed to serialize response")?
    );
    Ok(if response.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Load a session, optionally cleaning it with a full pipeline run first.
fn prepared_session(config: AnalysisConfig, cleaned: bool) -> Result<AnalysisSession> {
    let mut session = AnalysisSession::new(config);
    if cleaned {
        session
            .run_pipeline()
            .context("Pipeline failed before building chart data")?;
    } else {
        session.load().context("Failed to load dataset")?;
    }
    Ok(session)
}

/// Single-operation subcommands: load, run one operation, print its JSON.
fn run_command(config: AnalysisConfig, command: Commands, compact: bool) -> Result<ExitCode> {
    match command {
        Commands::Summary => {
            let session = prepared_session(config, false)?;
            emit(ApiResponse::from_optional(session.data_summary()), compact)
        }
        Commands::Missing => {
            let session = prepared_session(config, false)?;
            emit(session.missing_data().into(), compact)
        }
        Commands::Correlation => {
            let session = prepared_session(config, false)?;
            emit(ApiResponse::from_optional(session.correlation()), compact)
        }
        Commands::Outliers => {
            let mut session = prepared_session(config, false)?;
            emit(ApiResponse::from_optional(session.remove_outliers()), compact)
        }
        Commands::Features => {
            let mut session = prepared_session(config, false)?;
            emit(
                ApiResponse::from_optional(Ok(session.remove_features())),
                compact,
            )
        }
        Commands::Distribution { cleaned } => {
            let session = prepared_session(config, cleaned)?;
            emit(session.price_distribution().into(), compact)
        }
        Commands::Scatter { feature, cleaned } => {
            let session = prepared_session(config, cleaned)?;
            emit(session.scatter_data(feature.as_deref()).into(), compact)
        }
        Commands::BoxPlot { cleaned } => {
            let session = prepared_session(config, cleaned)?;
            emit(session.box_plot().into(), compact)
        }
        Commands::Run { report, save, .. } => {
            run_json(config, report.as_deref(), save.as_deref(), compact)
        }
    }
}

/// Write the optional run report and cleaned table of a finished run.
fn export_outputs(
    session: &AnalysisSession,
    report: &PipelineReport,
    report_path: Option<&Path>,
    save_path: Option<&Path>,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    if let Some(path) = report_path {
        export_run_report(&RunReport::new(session, report.clone()), path)?;
        written.push(path.to_path_buf());
    }

    if let Some(path) = save_path {
        let mut df = session
            .table()
            .cloned()
            .context("No cleaned table to save")?;
        save_dataset(&mut df, path)?;
        written.push(path.to_path_buf());
    }

    Ok(written)
}

/// Full pipeline as a single JSON document
fn run_json(
    config: AnalysisConfig,
    report_path: Option<&Path>,
    save_path: Option<&Path>,
    compact: bool,
) -> Result<ExitCode> {
    let mut session = AnalysisSession::new(config);
    let result = session.run_pipeline();

    if let Ok(report) = &result {
        export_outputs(&session, report, report_path, save_path)?;
    }

    emit(result.into(), compact)
}

/// Full pipeline with styled progress output
fn run_styled(
    config: AnalysisConfig,
    report_path: Option<&Path>,
    save_path: Option<&Path>,
) -> Result<ExitCode> {
    let start = Instant::now();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&config);

    let mut session = AnalysisSession::new(config);
    let spinner = create_spinner("Running analysis pipeline...");
    let report = match session.run_pipeline() {
        Ok(report) => {
            finish_with_success(&spinner, "Pipeline complete");
            report
        }
        Err(e) => {
            finish_with_warning(&spinner, "Pipeline failed");
            return Err(e).context("Analysis pipeline failed");
        }
    };
    let timings = *session.timings();

    // Step 1: Load
    print_step_header(1, "Load Dataset");
    match session.source() {
        Some(source) if source.is_synthetic() => {
            print_warning(&format!("Input unavailable, using {}", source))
        }
        Some(source) => print_success(&format!("Loaded {}", source)),
        None => {}
    }
    let (rows, cols) = report.initial_summary.shape;
    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!(
        "      Price: mean {}, median {}, std {}",
        report.initial_summary.avg_price,
        report.initial_summary.median_price,
        report.initial_summary.price_std
    );
    print_step_time(timings.load + timings.initial_summary);

    // Step 2: Missing values
    print_step_header(2, "Missing Value Analysis");
    if report.missing_data.is_empty() {
        print_info("No missing values found");
    } else {
        print_count("column(s) with missing values", report.missing_data.len(), None);
        for entry in report.missing_data.iter().take(5) {
            println!(
                "        {} {:<16} {:>6} ({:.1}%)",
                style("•").dim(),
                entry.feature,
                entry.missing,
                entry.percentage
            );
        }
    }
    print_step_time(timings.missing);

    // Step 3: Correlation
    print_step_header(3, "Correlation Analysis");
    let top = &report.correlation_data.top_features;
    print_count(
        "numeric column(s) correlated",
        report.correlation_data.correlation_matrix.len(),
        None,
    );
    for feature in top.iter().take(5) {
        println!(
            "        {} {:<16} {:>7.3}",
            style("•").dim(),
            feature.name,
            feature.correlation
        );
    }
    print_step_time(timings.correlation);

    // Step 4: Outliers
    print_step_header(4, "Outlier Removal");
    let outliers = &report.outlier_info;
    if outliers.outliers_removed == 0 {
        print_info(&format!("No prices above {}", outliers.boundary));
    } else {
        print_count(
            "house(s) above the price boundary",
            outliers.outliers_removed,
            Some(&format!("(> {})", outliers.boundary)),
        );
        print_success("Removed extreme prices");
    }
    print_step_time(timings.outliers);

    // Step 5: Features
    print_step_header(5, "Feature Engineering");
    let features = &report.feature_info;
    if features.removed_features == 0 {
        print_info("No pruned features present");
    } else {
        print_count("pruned feature(s)", features.removed_features, None);
        print_success(&format!(
            "Kept {}",
            features.remaining_features.join(", ")
        ));
    }
    print_step_time(timings.features + timings.final_summary);

    // Step 6: Exports
    if report_path.is_some() || save_path.is_some() {
        print_step_header(6, "Save Results");
        let spinner = create_spinner("Writing output files...");
        let written = export_outputs(&session, &report, report_path, save_path)?;
        finish_with_success(&spinner, "Outputs written");
        for path in written {
            print_success(&format!("Saved to {}", path.display()));
        }
    }

    let source = session
        .source()
        .map(|s| s.to_string())
        .unwrap_or_default();
    PipelineSummary::from_report(&report, source, start.elapsed()).display();
    print_completion();

    Ok(ExitCode::SUCCESS)
}
