//! Spendcast CLI - Spending forecasts from transaction exports
//!
//! Usage:
//!   spendcast forecast --file tx.csv --budget 1500   Month-end forecast
//!   spendcast benchmark --file tx.csv                Compare against reference averages
//!   spendcast profile --file tx.csv                  Series statistics
//!   spendcast config show                            Effective configuration

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config_path = cli.config.as_deref();
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Commands::Forecast {
            file,
            today: explicit_today,
            budget,
            json,
        } => {
            let config = commands::load_config(config_path)?;
            let today = match explicit_today {
                Some(s) => commands::parse_day(&s, "--today")?,
                None => today,
            };
            commands::cmd_forecast(&config, &file, today, budget.as_deref(), json)
        }
        Commands::Benchmark {
            file,
            period,
            from,
            to,
            json,
        } => {
            let config = commands::load_config(config_path)?;
            let (from, to) =
                commands::resolve_period(&period, from.as_deref(), to.as_deref(), today)?;
            commands::cmd_benchmark(&config, &file, from, to, json)
        }
        Commands::Profile {
            file,
            period,
            from,
            to,
            category,
            json,
        } => {
            let config = commands::load_config(config_path)?;
            let (from, to) =
                commands::resolve_period(&period, from.as_deref(), to.as_deref(), today)?;
            commands::cmd_profile(&config, &file, from, to, category.as_deref(), json)
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::cmd_config_show(config_path),
            ConfigAction::Path => commands::cmd_config_path(),
        },
    }
}
