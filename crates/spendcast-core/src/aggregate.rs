//! Aggregator: raw transactions to daily time series
//!
//! Every calendar day in the requested range appears exactly once, in order,
//! in the account-wide series and in each category series. Records dated
//! outside the range are dropped.

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{AggregatedSeries, DailySeries, DateRange, TransactionRecord};

/// Bucket `records` into per-day totals over `range`
pub fn aggregate(records: &[TransactionRecord], range: DateRange) -> AggregatedSeries {
    let mut total = DailySeries::zeroed(&range);
    let mut by_category: BTreeMap<String, DailySeries> = BTreeMap::new();
    let mut skipped = 0usize;

    for record in records {
        let date = record.date();
        if !range.contains(date) {
            skipped += 1;
            continue;
        }

        let amount = record.amount as f64;
        total.add(date, amount);
        by_category
            .entry(record.category.clone())
            .or_insert_with(|| DailySeries::zeroed(&range))
            .add(date, amount);
    }

    debug!(
        days = range.num_days(),
        records = records.len(),
        skipped,
        categories = by_category.len(),
        "Aggregated transactions"
    );

    AggregatedSeries {
        range,
        total,
        by_category,
    }
}

/// Mean spend per weekday (Monday first); `None` for weekdays with no days in the series
pub fn weekday_averages(series: &DailySeries) -> [Option<f64>; 7] {
    let groups = series.by_weekday();
    let mut averages = [None; 7];
    for (slot, values) in averages.iter_mut().zip(groups.iter()) {
        if !values.is_empty() {
            *slot = Some(values.iter().sum::<f64>() / values.len() as f64);
        }
    }
    averages
}
