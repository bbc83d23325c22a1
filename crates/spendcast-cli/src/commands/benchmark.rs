//! Benchmark command implementation

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use spendcast_core::{aggregate, BenchmarkComparator, BenchmarkResult, DateRange, EngineConfig};

use super::{format_amount, load_records, truncate};

/// Benchmark each category's spend over `from..=to`
pub fn run_benchmark(
    config: &EngineConfig,
    file: &Path,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<BenchmarkResult>> {
    let records = load_records(file)?;
    let series = aggregate(&records, DateRange::new(from, to));
    Ok(BenchmarkComparator::new(config).compare(&series))
}

pub fn cmd_benchmark(
    config: &EngineConfig,
    file: &Path,
    from: NaiveDate,
    to: NaiveDate,
    json: bool,
) -> Result<()> {
    let results = run_benchmark(config, file, from, to)?;

    if json {
        let output =
            serde_json::to_string_pretty(&results).context("Failed to serialize benchmark")?;
        println!("{}", output);
        return Ok(());
    }

    println!();
    println!("📊 Spending Benchmark");
    println!("   Period: {} to {}", from, to);
    println!("   ─────────────────────────────────────────────────────────────");

    if results.is_empty() {
        println!("   No categories with reference data in this period.");
        return Ok(());
    }

    let savings: i64 = results.iter().map(|r| r.potential_savings).sum();
    println!("   Potential savings: {}", format_amount(savings));
    println!();
    println!(
        "   {:18} │ {:>11} │ {:>11} │ {:>4} │ {:>10} │ {:>9}",
        "Category", "You", "Average", "Pct", "Savings", "Status"
    );
    println!("   ───────────────────┼─────────────┼─────────────┼──────┼────────────┼──────────");
    for result in &results {
        println!(
            "   {:18} │ {:>11} │ {:>11} │ {:>4} │ {:>10} │ {:>9}",
            truncate(&result.category, 18),
            format_amount(result.user_amount),
            format_amount(result.reference_amount),
            result.percentile,
            format_amount(result.potential_savings),
            result.status
        );
    }

    Ok(())
}
