//! Tests for CLI argument parsing and the housestat binary

use assert_cmd::Command;
use clap::Parser;
use housestat::cli::{Cli, Commands};
use predicates::prelude::*;
use std::path::PathBuf;

#[path = "common/mod.rs"]
mod common;

use common::*;

const MISSING_INPUT: &str = "/nonexistent/path/to/houses.csv";

fn housestat() -> Command {
    let mut cmd = Command::cargo_bin("housestat").unwrap();
    cmd.env("RUST_LOG", "off");
    cmd
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_cli_default_values() {
    let cli = Cli::parse_from(["housestat"]);
    let config = cli.to_config().unwrap();

    assert_eq!(config.data_path, PathBuf::from("data.csv"));
    assert_eq!(config.target_column, "SalePrice");
    assert_eq!(config.seed, 42);
    assert_eq!(config.synthetic_rows, 1460);
    assert_eq!(config.infer_schema_length, 10000);
    assert!(!cli.compact);
    assert_eq!(cli.log_level(), "info");
}

#[test]
fn test_cli_short_and_long_flags() {
    let cli = Cli::parse_from(["housestat", "-i", "houses.csv", "-t", "Price", "-v"]);
    assert_eq!(cli.input, Some(PathBuf::from("houses.csv")));
    assert_eq!(cli.target, Some("Price".to_string()));
    assert_eq!(cli.log_level(), "debug");

    let cli = Cli::parse_from(["housestat", "--input", "houses.csv", "--target", "Price"]);
    assert_eq!(cli.input, Some(PathBuf::from("houses.csv")));
    assert_eq!(cli.target, Some("Price".to_string()));
}

#[test]
fn test_cli_scatter_feature() {
    let cli = Cli::parse_from(["housestat", "scatter", "--feature", "GrLivArea"]);
    assert_eq!(
        cli.command(),
        Commands::Scatter {
            feature: Some("GrLivArea".to_string()),
            cleaned: false
        }
    );
}

#[test]
fn test_cli_run_flags() {
    let cli = Cli::parse_from([
        "housestat",
        "run",
        "--json",
        "--report",
        "report.json",
        "--save",
        "cleaned.parquet",
    ]);
    assert_eq!(
        cli.command(),
        Commands::Run {
            json: true,
            report: Some(PathBuf::from("report.json")),
            save: Some(PathBuf::from("cleaned.parquet")),
        }
    );
}

#[test]
fn test_cli_config_file_with_overrides() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.json");
    std::fs::write(&config_path, r#"{ "seed": 7, "histogram_bins": 10, "removal_fence": 2.5 }"#)
        .unwrap();

    let cli = Cli::parse_from([
        "housestat",
        "--config",
        config_path.to_str().unwrap(),
        "--seed",
        "9",
    ]);
    let config = cli.to_config().unwrap();

    assert_eq!(config.seed, 9, "Flags override the config file");
    assert_eq!(config.histogram_bins, 10);
    assert_eq!(config.removal_fence, 2.5);
}

#[test]
fn test_cli_invalid_config_file() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.json");
    std::fs::write(&config_path, r#"{ "box_plot_fence": -1.0 }"#).unwrap();

    let cli = Cli::parse_from(["housestat", "--config", config_path.to_str().unwrap()]);
    assert!(cli.to_config().is_err());
}

#[test]
fn test_binary_summary_uses_synthetic_fallback() {
    let json = stdout_json(housestat().args(["summary", "--compact", "-i", MISSING_INPUT]));

    assert_eq!(json["total_houses"], 1460);
    assert_eq!(json["shape"], serde_json::json!([1460, 38]));
    assert!(json["avg_price"].as_str().unwrap().starts_with('$'));
}

#[test]
fn test_binary_missing_on_csv() {
    let mut df = create_houses_dataframe();
    let (_temp_dir, csv_path) = create_temp_csv(&mut df);

    let json = stdout_json(housestat().args(["missing", "-i", csv_path.to_str().unwrap()]));
    let entries = json.as_array().unwrap();

    assert_eq!(entries[0]["feature"], "Alley");
    assert_eq!(entries[0]["missing"], 15);
    assert_eq!(entries[0]["percentage"], 75.0);
}

#[test]
fn test_binary_scatter_unknown_feature() {
    housestat()
        .args(["scatter", "--feature", "NotAColumn", "-i", MISSING_INPUT, "--compact"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            r#"{"error":"Feature NotAColumn not found"}"#,
        ));
}

#[test]
fn test_binary_run_json() {
    let json = stdout_json(housestat().args(["run", "--json", "-i", MISSING_INPUT, "--rows", "300"]));

    assert_eq!(json["success"], true);
    assert_eq!(json["initial_summary"]["total_houses"], 300);
    assert_eq!(json["feature_info"]["final_features"], 7);
}

#[test]
fn test_binary_cleaned_box_plot() {
    let json = stdout_json(housestat().args([
        "box-plot",
        "--cleaned",
        "-i",
        MISSING_INPUT,
        "--rows",
        "300",
    ]));

    let q1 = json["q1"].as_f64().unwrap();
    let q3 = json["q3"].as_f64().unwrap();
    assert!(q1 <= q3);
    assert!(json["whiskers"]["upper"].as_f64().unwrap() <= json["upper_bound"].as_f64().unwrap());
}

#[test]
fn test_binary_styled_run_writes_outputs() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let report_path = temp_dir.path().join("report.json");
    let save_path = temp_dir.path().join("cleaned.csv");

    housestat()
        .args([
            "-i",
            MISSING_INPUT,
            "--rows",
            "200",
            "run",
            "--report",
            report_path.to_str().unwrap(),
            "--save",
            save_path.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("PIPELINE SUMMARY"));

    assert!(report_path.exists());
    assert!(save_path.exists());
}

#[test]
fn test_binary_rejects_invalid_rows() {
    housestat()
        .args(["summary", "--rows", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("rows must be at least 1"));
}
