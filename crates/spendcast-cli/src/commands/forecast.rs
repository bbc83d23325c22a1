//! Forecast command implementation

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use spendcast_core::import::parse_amount;
use spendcast_core::{EngineConfig, ForecastEngine, ForecastResult};
use tracing::info;

use super::{format_amount, load_records, truncate};

/// Forecast the month containing `today` from a CSV export
pub fn run_forecast(
    config: &EngineConfig,
    file: &Path,
    today: NaiveDate,
    budget: Option<&str>,
) -> Result<ForecastResult> {
    let budget_limit = budget
        .map(|b| parse_amount(b).with_context(|| format!("Invalid --budget amount: {}", b)))
        .transpose()?;

    let records = load_records(file)?;
    info!(records = records.len(), %today, "Forecasting month");

    let engine = ForecastEngine::new(config);
    Ok(engine.forecast_month(&records, today, budget_limit))
}

pub fn cmd_forecast(
    config: &EngineConfig,
    file: &Path,
    today: NaiveDate,
    budget: Option<&str>,
    json: bool,
) -> Result<()> {
    let result = run_forecast(config, file, today, budget)?;

    if json {
        let output =
            serde_json::to_string_pretty(&result).context("Failed to serialize forecast")?;
        println!("{}", output);
        return Ok(());
    }

    print_forecast(&result, today);
    Ok(())
}

fn print_forecast(result: &ForecastResult, today: NaiveDate) {
    println!();
    println!("📈 Month-End Forecast");
    println!(
        "   As of {} (day {} of {})",
        today,
        result.days_elapsed,
        result.days_elapsed + result.days_remaining
    );
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Spent so far:    {:>12}", format_amount(result.current_spent));
    println!("   Predicted total: {:>12}", format_amount(result.predicted_total));
    println!("   Confidence:      {:>11}%", result.confidence);
    println!("   Spending type:   {:>12}", result.spending_type);

    if let (Some(limit), Some(daily)) = (result.budget_limit, result.predicted_daily_budget) {
        println!();
        println!("   Budget:          {:>12}", format_amount(limit));
        if daily >= 0 {
            println!("   Daily allowance: {:>12}", format_amount(daily));
        } else {
            println!(
                "   \x1b[31mOver budget by {}\x1b[0m",
                format_amount(result.current_spent - limit)
            );
        }
        if let Some(overrun) = result.projected_overrun {
            if overrun > 0 {
                println!(
                    "   \x1b[33mOn pace to exceed budget by {}\x1b[0m",
                    format_amount(overrun)
                );
            }
        }
    }

    if result.breakdown.is_empty() {
        println!();
        println!("   No spending found in this period.");
        return;
    }

    println!();
    println!(
        "   {:20} │ {:>11} │ {:>11} │ {:>5} │ {:>8}",
        "Category", "Spent", "Predicted", "Trend", "Type"
    );
    println!("   ─────────────────────┼─────────────┼─────────────┼───────┼─────────");
    for entry in &result.breakdown {
        println!(
            "   {:20} │ {:>11} │ {:>11} │ {:>5} │ {:>8}",
            truncate(&entry.category, 20),
            format_amount(entry.spent),
            format_amount(entry.predicted_total),
            entry.trend,
            entry.spending_type
        );
    }
}
