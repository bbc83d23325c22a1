//! Integration tests for spendcast-core
//!
//! These tests exercise the full import → aggregate → forecast → benchmark workflow.

use chrono::NaiveDate;
use spendcast_core::{
    advisor, aggregate, import::parse_csv, models::DateRange, BenchmarkComparator,
    BenchmarkStatus, EngineConfig, ForecastEngine, ForecastPeriod, SeriesProfile, SpendingType,
    TransactionRecord, Trend,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// April 2026 export with bank-style negative expenses: groceries daily
/// through the 10th, two cinema charges, one zero-amount hold and one row
/// from the previous month.
fn april_csv() -> &'static str {
    r#"date,description,amount,category
2026-04-01,CORNER MARKET,-40.00,Groceries
2026-04-02,CORNER MARKET,-40.00,Groceries
2026-04-03,CORNER MARKET,-40.00,Groceries
2026-04-04,CORNER MARKET,-40.00,Groceries
2026-04-04,CINEMA,-25.00,Entertainment
2026-04-05,CORNER MARKET,-40.00,Groceries
2026-04-06,CORNER MARKET,-40.00,Groceries
2026-04-07,CORNER MARKET,-40.00,Groceries
2026-04-08,CORNER MARKET,-40.00,Groceries
2026-04-09,CORNER MARKET,-40.00,Groceries
2026-04-10,CORNER MARKET,-40.00,Groceries
2026-04-10,PENDING HOLD,0.00,Shopping
2026-04-11,CINEMA,-25.00,Entertainment
2026-03-28,OLD PURCHASE,-99.00,Groceries"#
}

fn engine() -> (ForecastEngine, BenchmarkComparator) {
    let config = EngineConfig::embedded().expect("embedded config parses");
    (
        ForecastEngine::new(&config),
        BenchmarkComparator::new(&config),
    )
}

// =============================================================================
// Forecast Workflow
// =============================================================================

#[test]
fn test_csv_to_forecast() {
    let records = parse_csv(april_csv().as_bytes()).expect("Failed to parse CSV");
    assert_eq!(records.len(), 13);

    let (forecast, _) = engine();
    let result = forecast.forecast_month(&records, date(2026, 4, 10), Some(150000));

    // Only April 1-10 counts: 10 x 4000 groceries + 2500 entertainment
    assert_eq!(result.days_elapsed, 10);
    assert_eq!(result.days_remaining, 20);
    assert_eq!(result.current_spent, 42500);
    assert!(result.predicted_total >= result.current_spent);
    assert!(result.confidence <= 100);

    assert_eq!(result.breakdown.len(), 2);
    assert_eq!(result.breakdown[0].category, "Groceries");
    assert_eq!(result.breakdown[0].spent, 40000);
    assert_eq!(result.breakdown[0].predicted_total, 120000);
    assert_eq!(result.breakdown[0].trend, Trend::Flat);
    assert_eq!(result.breakdown[0].spending_type, SpendingType::Steady);

    assert_eq!(result.budget_limit, Some(150000));
    let daily = result.predicted_daily_budget.unwrap();
    assert_eq!(daily, (150000 - 42500) / 20);
    assert_eq!(
        result.projected_overrun,
        Some(result.predicted_total - 150000)
    );
}

#[test]
fn test_flat_history_projects_linearly() {
    let records: Vec<TransactionRecord> = DateRange::new(date(2026, 6, 1), date(2026, 6, 10))
        .days()
        .map(|d| TransactionRecord::on_date(d, 100, "Utilities"))
        .collect();

    let (forecast, _) = engine();
    let result = forecast.forecast_month(&records, date(2026, 6, 10), None);

    assert_eq!(result.current_spent, 1000);
    assert_eq!(result.predicted_total, 3000);
    assert!(result.confidence > 50);
    assert!(result.predicted_daily_budget.is_none());
}

#[test]
fn test_single_large_purchase_is_low_confidence() {
    let records = vec![TransactionRecord::on_date(date(2026, 6, 1), 500, "Shopping")];

    let (forecast, _) = engine();
    let result = forecast.forecast_month(&records, date(2026, 6, 1), None);

    assert_eq!(result.days_elapsed, 1);
    assert!(result.confidence <= 20);
    assert!(result.predicted_total >= 500);
    // Stays near what is spent instead of extrapolating day one across the month
    assert!(result.predicted_total <= 500 * 7);
}

#[test]
fn test_empty_history() {
    let (forecast, _) = engine();
    let result = forecast.forecast_month(&[], date(2026, 6, 12), Some(50000));

    assert_eq!(result.current_spent, 0);
    assert_eq!(result.predicted_total, 0);
    assert!(result.confidence <= 20);
    // 50000 / 18 rounds to 2778
    assert_eq!(result.predicted_daily_budget, Some(2778));
    assert!(result.breakdown.is_empty());
}

#[test]
fn test_last_day_of_month_is_exact() {
    let records: Vec<TransactionRecord> = DateRange::new(date(2026, 4, 1), date(2026, 4, 30))
        .days()
        .enumerate()
        .map(|(i, d)| TransactionRecord::on_date(d, (i as i64 * 37) % 900, "Dining"))
        .collect();
    let spent: i64 = records.iter().map(|r| r.amount).sum();

    let (forecast, _) = engine();
    let result = forecast.forecast_month(&records, date(2026, 4, 30), Some(spent + 100));

    assert_eq!(result.days_remaining, 0);
    assert_eq!(result.current_spent, spent);
    assert_eq!(result.predicted_total, spent);
    // Zero days remaining still divides by one day
    assert_eq!(result.predicted_daily_budget, Some(100));
}

#[test]
fn test_forecast_is_monotone_in_history() {
    let today = date(2026, 5, 14);
    let base: Vec<TransactionRecord> = DateRange::new(date(2026, 5, 1), today)
        .days()
        .enumerate()
        .map(|(i, d)| TransactionRecord::on_date(d, [0, 1200, 300, 0, 4500][i % 5], "Dining"))
        .collect();

    let (forecast, _) = engine();
    let baseline = forecast.forecast_month(&base, today, None).predicted_total;

    for day in DateRange::new(date(2026, 5, 1), today).days() {
        let mut bumped = base.clone();
        bumped.push(TransactionRecord::on_date(day, 2000, "Dining"));
        let result = forecast.forecast_month(&bumped, today, None);
        assert!(result.predicted_total >= baseline, "bump on {} lowered forecast", day);
    }
}

#[test]
fn test_budget_advice_examples() {
    assert_eq!(advisor::predicted_daily_budget(2000, 1800, 2), 100);
    assert_eq!(advisor::predicted_daily_budget(2000, 2200, 2), -100);
}

// =============================================================================
// Benchmark Workflow
// =============================================================================

#[test]
fn test_csv_to_benchmark() {
    let records = parse_csv(april_csv().as_bytes()).expect("Failed to parse CSV");
    let period = ForecastPeriod::month_of(date(2026, 4, 30));
    let series = aggregate(&records, period.full_range());

    let (_, comparator) = engine();
    let results = comparator.compare(&series);

    // Groceries 40000 vs 45000; Entertainment 5000 vs 15000
    assert_eq!(results.len(), 2);
    for result in &results {
        assert!((1..=99).contains(&result.percentile));
        assert!(result.potential_savings >= 0);
    }

    // Groceries top quartile is 36000
    assert_eq!(results[0].category, "Groceries");
    assert_eq!(results[0].potential_savings, 4000);
    assert_eq!(results[0].reference_amount, 45000);

    assert_eq!(results[1].category, "Entertainment");
    assert_eq!(results[1].potential_savings, 0);
    assert_eq!(results[1].status, BenchmarkStatus::Excellent);
}

#[test]
fn test_benchmark_at_reference_is_median() {
    let (_, comparator) = engine();
    let result = comparator.compare_amount("Dining", 30000).unwrap();
    assert_eq!(result.percentile, 50);
}

// =============================================================================
// Profile
// =============================================================================

#[test]
fn test_weekend_profile_is_seasonal() {
    // Four weeks from Monday 2026-06-01: weekends 200, weekdays 80
    let records: Vec<TransactionRecord> = DateRange::new(date(2026, 6, 1), date(2026, 6, 28))
        .days()
        .enumerate()
        .map(|(i, d)| {
            let amount = if i % 7 >= 5 { 200 } else { 80 };
            TransactionRecord::on_date(d, amount, "Dining")
        })
        .collect();
    let series = aggregate(&records, DateRange::new(date(2026, 6, 1), date(2026, 6, 28)));

    let config = EngineConfig::embedded().unwrap();
    let profile = SeriesProfile::from_series(&series.total, &config.classifier);

    assert_eq!(profile.days, 28);
    assert_eq!(profile.spending_type, SpendingType::Seasonal);
    assert!(profile.seasonality[5] > 1.0);
    assert!(profile.seasonality[0] < 1.0);
}
