//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `forecast` - Month-end forecast with optional budget advice
//! - `benchmark` - Category comparison against reference averages
//! - `profile` - Descriptive statistics for a period
//! - `config` - Effective configuration and override location

pub mod benchmark;
pub mod config;
pub mod forecast;
pub mod profile;

// Re-export command functions for main.rs
pub use benchmark::*;
pub use config::*;
pub use forecast::*;
pub use profile::*;

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{Duration, NaiveDate};
use spendcast_core::{import, EngineConfig, ForecastPeriod, TransactionRecord};

/// Load engine config (explicit path, data dir override, embedded defaults)
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    EngineConfig::load(path).context("Failed to load engine config")
}

/// Read transactions from a CSV export
pub fn load_records(file: &Path) -> Result<Vec<TransactionRecord>> {
    if !file.exists() {
        bail!("File not found: {}", file.display());
    }
    import::read_csv_file(file).with_context(|| format!("Failed to import {}", file.display()))
}

/// Parse a YYYY-MM-DD argument
pub fn parse_day(s: &str, flag: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid {} date format (use YYYY-MM-DD)", flag))
}

/// Resolve a period string to (from_date, to_date) relative to `today`
pub fn resolve_period(
    period: &str,
    custom_from: Option<&str>,
    custom_to: Option<&str>,
    today: NaiveDate,
) -> Result<(NaiveDate, NaiveDate)> {
    // If custom dates provided, use those
    if let (Some(from), Some(to)) = (custom_from, custom_to) {
        let from_date = parse_day(from, "--from")?;
        let to_date = parse_day(to, "--to")?;
        if to_date < from_date {
            bail!("--to ({}) is before --from ({})", to_date, from_date);
        }
        return Ok((from_date, to_date));
    }

    let month = ForecastPeriod::month_of(today);

    match period.to_lowercase().as_str() {
        "this-month" => Ok((month.start, today)),
        "last-month" => {
            let last_day = month
                .start
                .pred_opt()
                .context("No month before the earliest representable date")?;
            Ok((ForecastPeriod::month_of(last_day).start, last_day))
        }
        "last-30-days" => Ok((today - Duration::days(30), today)),
        _ => bail!(
            "Unknown period: {}. Use this-month, last-month, or last-30-days",
            period
        ),
    }
}

/// Format minor units as a currency string, e.g. `-$1,234.56`
pub fn format_amount(minor: i64) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let abs = minor.unsigned_abs();
    let whole = (abs / 100).to_string();

    let mut grouped = String::new();
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{}${}.{:02}", sign, grouped, abs % 100)
}

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
