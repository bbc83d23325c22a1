//! Test utilities for spendcast-core
//!
//! Fixture builders for records, series and CSV exports shared by unit,
//! integration and CLI tests.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{AggregatedSeries, DailySeries, DateRange, TransactionRecord};

/// Shorthand for a calendar date; panics on an invalid date
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
}

/// One record per day of `range`, each for `amount` in `category`
pub fn daily_records(range: DateRange, amount: i64, category: &str) -> Vec<TransactionRecord> {
    range
        .days()
        .map(|day| TransactionRecord::on_date(day, amount, category))
        .collect()
}

/// Single-category aggregated series with `values` starting at `start`
pub fn series_from_values(start: NaiveDate, values: &[f64], category: &str) -> AggregatedSeries {
    let total = DailySeries::from_values(start, values);
    let end = total.last_date().unwrap_or(start);
    let mut by_category = BTreeMap::new();
    by_category.insert(category.to_string(), total.clone());
    AggregatedSeries {
        range: DateRange::new(start, end),
        total,
        by_category,
    }
}

/// `days` days of constant spend starting at `start`
pub fn flat_series(start: NaiveDate, days: usize, value: f64) -> AggregatedSeries {
    series_from_values(start, &vec![value; days], "General")
}

/// Render records as a CSV export with `date,description,amount,category` columns.
///
/// Amounts are written as bank-style negative expenses whatever their sign.
pub fn records_to_csv(records: &[TransactionRecord]) -> String {
    let mut csv = String::from("date,description,amount,category\n");
    for record in records {
        let cents = record.amount.unsigned_abs();
        csv.push_str(&format!(
            "{},PURCHASE,-{}.{:02},{}\n",
            record.date(),
            cents / 100,
            cents % 100,
            record.category
        ));
    }
    csv
}

/// A month of mixed household spending from 2026-03-01 through `through`
///
/// Groceries every third day, transport on weekdays, dining on weekends.
pub fn household_records(through: NaiveDate) -> Vec<TransactionRecord> {
    use chrono::Datelike;

    DateRange::new(date(2026, 3, 1), through)
        .days()
        .flat_map(|day| {
            let mut records = Vec::new();
            if day.day0() % 3 == 0 {
                records.push(TransactionRecord::on_date(day, 6500, "Groceries"));
            }
            if day.weekday().num_days_from_monday() < 5 {
                records.push(TransactionRecord::on_date(day, 550, "Transport"));
            } else {
                records.push(TransactionRecord::on_date(day, 4200, "Dining"));
            }
            records
        })
        .collect()
}
