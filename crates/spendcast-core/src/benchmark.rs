//! Benchmark comparator
//!
//! Places a user's per-category spend against a static reference population.
//! The percentile is a logistic curve of `user / reference`, so it is
//! non-decreasing in the user amount and always lands inside 1..=99.

use tracing::debug;

use crate::config::{BenchmarkConfig, EngineConfig};
use crate::models::{AggregatedSeries, BenchmarkResult, BenchmarkStatus};

/// Logistic percentile of `user_amount` against `reference_amount`.
///
/// Equal amounts sit at the 50th percentile. A non-positive reference puts any
/// positive spend at 99 and zero spend at 50.
pub fn percentile(user_amount: i64, reference_amount: i64, steepness: f64) -> u8 {
    if reference_amount <= 0 {
        return if user_amount > 0 { 99 } else { 50 };
    }
    let ratio = user_amount as f64 / reference_amount as f64;
    let p = 100.0 / (1.0 + (-steepness * (ratio - 1.0)).exp());
    p.round().clamp(1.0, 99.0) as u8
}

/// Spend above the top-quartile amount, never negative
pub fn potential_savings(user_amount: i64, top_quartile_amount: i64) -> i64 {
    (user_amount - top_quartile_amount).max(0)
}

#[derive(Debug, Clone, Default)]
pub struct BenchmarkComparator {
    config: BenchmarkConfig,
}

impl BenchmarkComparator {
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_config(config.benchmark.clone())
    }

    pub fn with_config(config: BenchmarkConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Compare one category amount. `None` when the category has no reference data.
    pub fn compare_amount(&self, category: &str, user_amount: i64) -> Option<BenchmarkResult> {
        let reference = self.config.categories.get(category)?;
        let top_quartile = self.config.top_quartile_amount(category)?;
        let percentile = percentile(
            user_amount,
            reference.average,
            self.config.sigmoid_steepness,
        );

        Some(BenchmarkResult {
            category: category.to_string(),
            user_amount,
            reference_amount: reference.average,
            percentile,
            potential_savings: potential_savings(user_amount, top_quartile),
            status: BenchmarkStatus::from_percentile(percentile),
        })
    }

    /// Compare every category of an aggregated period, largest savings first.
    ///
    /// Categories without reference data are skipped.
    pub fn compare(&self, series: &AggregatedSeries) -> Vec<BenchmarkResult> {
        let mut skipped = Vec::new();
        let mut results: Vec<BenchmarkResult> = series
            .category_totals()
            .into_iter()
            .filter_map(|(category, total)| {
                let result = self.compare_amount(&category, total.round() as i64);
                if result.is_none() {
                    skipped.push(category);
                }
                result
            })
            .collect();

        results.sort_by(|a, b| {
            b.potential_savings
                .cmp(&a.potential_savings)
                .then_with(|| a.category.cmp(&b.category))
        });

        debug!(
            compared = results.len(),
            skipped = ?skipped,
            "Benchmarked categories"
        );
        results
    }
}
