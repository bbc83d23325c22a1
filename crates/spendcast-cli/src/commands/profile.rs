//! Profile command implementation

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use spendcast_core::{aggregate, DateRange, EngineConfig, SeriesProfile};

use super::load_records;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Profile all spending, or one category, over `from..=to`
pub fn run_profile(
    config: &EngineConfig,
    file: &Path,
    from: NaiveDate,
    to: NaiveDate,
    category: Option<&str>,
) -> Result<SeriesProfile> {
    let records = load_records(file)?;
    let series = aggregate(&records, DateRange::new(from, to));

    let daily = match category {
        Some(name) => match series.category(name) {
            Some(daily) => daily,
            None => bail!("No spending in category '{}' between {} and {}", name, from, to),
        },
        None => &series.total,
    };

    Ok(SeriesProfile::from_series(daily, &config.classifier))
}

pub fn cmd_profile(
    config: &EngineConfig,
    file: &Path,
    from: NaiveDate,
    to: NaiveDate,
    category: Option<&str>,
    json: bool,
) -> Result<()> {
    let profile = run_profile(config, file, from, to, category)?;

    if json {
        let output =
            serde_json::to_string_pretty(&profile).context("Failed to serialize profile")?;
        println!("{}", output);
        return Ok(());
    }

    println!();
    println!("🔍 Spending Profile: {}", category.unwrap_or("All spending"));
    println!("   Period: {} to {} ({} days)", from, to, profile.days);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Total:        {:>12.2}", profile.total / 100.0);
    println!("   Daily mean:   {:>12.2}", profile.mean / 100.0);
    println!("   Daily stdev:  {:>12.2}", profile.stdev / 100.0);
    println!("   Variation:    {:>12.2}", profile.coefficient_of_variation);
    println!("   Slope/day:    {:>12.2}", profile.slope / 100.0);
    println!("   Type:         {:>12}", profile.spending_type);
    println!();
    println!("   Weekday index (1.00 = average day)");
    for (day, index) in WEEKDAYS.iter().zip(profile.seasonality.iter()) {
        let bar = "█".repeat((index * 10.0).round().clamp(0.0, 40.0) as usize);
        println!("   {} {:>5.2} {}", day, index, bar);
    }

    Ok(())
}
