//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;
use std::path::PathBuf;

use spendcast_core::test_utils::{date, daily_records, household_records, records_to_csv};
use spendcast_core::{BenchmarkStatus, DateRange, EngineConfig, SpendingType};
use tempfile::TempDir;

use crate::commands::{self, format_amount, truncate};

fn config() -> EngineConfig {
    EngineConfig::embedded().unwrap()
}

/// Write `contents` to a CSV file inside a fresh temp dir
fn write_csv(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("transactions.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    (dir, path)
}

// ========== Helper Tests ==========

#[test]
fn test_format_amount() {
    assert_eq!(format_amount(0), "$0.00");
    assert_eq!(format_amount(5), "$0.05");
    assert_eq!(format_amount(123456), "$1,234.56");
    assert_eq!(format_amount(-100000000), "-$1,000,000.00");
}

#[test]
fn test_truncate() {
    assert_eq!(truncate("Groceries", 20), "Groceries");
    assert_eq!(truncate("Home Improvement Supplies", 10), "Home Im...");
}

#[test]
fn test_resolve_period_named() {
    let today = date(2026, 3, 15);

    let (from, to) = commands::resolve_period("this-month", None, None, today).unwrap();
    assert_eq!((from, to), (date(2026, 3, 1), today));

    let (from, to) = commands::resolve_period("last-month", None, None, today).unwrap();
    assert_eq!((from, to), (date(2026, 2, 1), date(2026, 2, 28)));

    let (from, to) = commands::resolve_period("LAST-30-DAYS", None, None, today).unwrap();
    assert_eq!((from, to), (date(2026, 2, 13), today));
}

#[test]
fn test_resolve_period_january_rolls_back_a_year() {
    let (from, to) = commands::resolve_period("last-month", None, None, date(2026, 1, 9)).unwrap();
    assert_eq!((from, to), (date(2025, 12, 1), date(2025, 12, 31)));
}

#[test]
fn test_resolve_period_custom_and_invalid() {
    let today = date(2026, 3, 15);
    let (from, to) =
        commands::resolve_period("this-month", Some("2025-11-02"), Some("2025-11-20"), today)
            .unwrap();
    assert_eq!((from, to), (date(2025, 11, 2), date(2025, 11, 20)));

    assert!(commands::resolve_period("fortnight", None, None, today).is_err());
    assert!(commands::resolve_period("this-month", Some("11/02/2025"), Some("2025-11-20"), today)
        .is_err());
    assert!(commands::resolve_period("this-month", Some("2025-11-20"), Some("2025-11-02"), today)
        .is_err());
}

#[test]
fn test_load_records_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = commands::load_records(&dir.path().join("nope.csv")).unwrap_err();
    assert!(err.to_string().contains("File not found"));
}

// ========== Forecast Command Tests ==========

#[test]
fn test_run_forecast_flat_month() {
    let records = daily_records(DateRange::new(date(2026, 6, 1), date(2026, 6, 10)), 10000, "Groceries");
    let (_dir, path) = write_csv(&records_to_csv(&records));

    let result = commands::run_forecast(&config(), &path, date(2026, 6, 10), Some("$2,500.00"))
        .unwrap();

    assert_eq!(result.current_spent, 100000);
    assert_eq!(result.predicted_total, 300000);
    assert_eq!(result.budget_limit, Some(250000));
    // (250000 - 100000) / 20 days
    assert_eq!(result.predicted_daily_budget, Some(7500));
    assert_eq!(result.projected_overrun, Some(50000));
}

#[test]
fn test_run_forecast_invalid_budget() {
    let (_dir, path) = write_csv("date,amount,category\n2026-06-01,-5.00,Dining\n");
    let err = commands::run_forecast(&config(), &path, date(2026, 6, 10), Some("lots"))
        .unwrap_err();
    assert!(err.to_string().contains("--budget"));
}

#[test]
fn test_cmd_forecast_outputs() {
    let (_dir, path) = write_csv(&records_to_csv(&household_records(date(2026, 3, 18))));
    let config = config();

    assert!(commands::cmd_forecast(&config, &path, date(2026, 3, 18), None, false).is_ok());
    assert!(commands::cmd_forecast(&config, &path, date(2026, 3, 18), Some("900"), true).is_ok());
}

#[test]
fn test_cmd_forecast_empty_file() {
    let (_dir, path) = write_csv("date,amount,category\n");
    assert!(commands::cmd_forecast(&config(), &path, date(2026, 3, 18), Some("100"), false).is_ok());
}

// ========== Benchmark Command Tests ==========

#[test]
fn test_run_benchmark() {
    let (_dir, path) = write_csv(&records_to_csv(&household_records(date(2026, 3, 31))));
    let results =
        commands::run_benchmark(&config(), &path, date(2026, 3, 1), date(2026, 3, 31)).unwrap();

    // Groceries, Transport and Dining all have reference data
    assert_eq!(results.len(), 3);
    for pair in results.windows(2) {
        assert!(pair[0].potential_savings >= pair[1].potential_savings);
    }

    let transport = results.iter().find(|r| r.category == "Transport").unwrap();
    // 22 weekdays in March 2026 at 5.50
    assert_eq!(transport.user_amount, 12100);
    assert_eq!(transport.potential_savings, 0);
    assert_eq!(transport.status, BenchmarkStatus::Excellent);
}

#[test]
fn test_cmd_benchmark_outputs() {
    let (_dir, path) = write_csv(&records_to_csv(&household_records(date(2026, 3, 31))));
    let config = config();
    assert!(commands::cmd_benchmark(&config, &path, date(2026, 3, 1), date(2026, 3, 31), false).is_ok());
    assert!(commands::cmd_benchmark(&config, &path, date(2026, 3, 1), date(2026, 3, 31), true).is_ok());
}

// ========== Profile Command Tests ==========

#[test]
fn test_run_profile_category() {
    let records = daily_records(DateRange::new(date(2026, 5, 1), date(2026, 5, 28)), 2500, "Transport");
    let (_dir, path) = write_csv(&records_to_csv(&records));

    let profile = commands::run_profile(
        &config(),
        &path,
        date(2026, 5, 1),
        date(2026, 5, 28),
        Some("Transport"),
    )
    .unwrap();

    assert_eq!(profile.days, 28);
    assert!((profile.total - 70000.0).abs() < 1e-9);
    assert_eq!(profile.spending_type, SpendingType::Steady);
}

#[test]
fn test_run_profile_unknown_category() {
    let (_dir, path) = write_csv(&records_to_csv(&household_records(date(2026, 3, 10))));
    let err = commands::run_profile(
        &config(),
        &path,
        date(2026, 3, 1),
        date(2026, 3, 10),
        Some("Travel"),
    )
    .unwrap_err();
    assert!(err.to_string().contains("Travel"));
}

#[test]
fn test_cmd_profile_outputs() {
    let (_dir, path) = write_csv(&records_to_csv(&household_records(date(2026, 3, 31))));
    let config = config();
    assert!(commands::cmd_profile(&config, &path, date(2026, 3, 1), date(2026, 3, 31), None, false).is_ok());
    assert!(commands::cmd_profile(
        &config,
        &path,
        date(2026, 3, 1),
        date(2026, 3, 31),
        Some("Dining"),
        true
    )
    .is_ok());
}

// ========== Config Command Tests ==========

#[test]
fn test_load_config_explicit_file() {
    let (dir, _) = write_csv("");
    let path = dir.path().join("engine.toml");
    std::fs::write(&path, "[forecast]\ncold_start_days = 7\n").unwrap();

    let config = commands::load_config(Some(&path)).unwrap();
    assert_eq!(config.forecast.cold_start_days, 7);
    assert!(commands::cmd_config_show(Some(&path)).is_ok());
}

#[test]
fn test_load_config_invalid_file() {
    let (dir, _) = write_csv("");
    let path = dir.path().join("engine.toml");
    std::fs::write(&path, "[classifier]\nsteady_max_cv = -1.0\n").unwrap();

    let err = commands::load_config(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("engine config"));
}

#[test]
fn test_cmd_config_path() {
    assert!(commands::cmd_config_path().is_ok());
}
