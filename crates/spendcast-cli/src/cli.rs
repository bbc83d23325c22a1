//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Spendcast - Forecast where this month's spending is heading
#[derive(Parser)]
#[command(name = "spendcast")]
#[command(about = "Statistical spending forecasts from transaction exports", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Engine config file (defaults to the data dir override, then built-in values)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Forecast the month-end total for the month containing --today
    Forecast {
        /// Transaction CSV (date, amount, category columns)
        #[arg(short, long)]
        file: PathBuf,

        /// Current date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        today: Option<String>,

        /// Monthly budget limit, e.g. 1500 or 1,500.00
        #[arg(short, long)]
        budget: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare category spending against reference averages
    Benchmark {
        /// Transaction CSV (date, amount, category columns)
        #[arg(short, long)]
        file: PathBuf,

        /// Time period: this-month, last-month, last-30-days
        #[arg(long, default_value = "last-month")]
        period: String,

        /// Custom start date (YYYY-MM-DD) - overrides period
        #[arg(long)]
        from: Option<String>,

        /// Custom end date (YYYY-MM-DD) - overrides period
        #[arg(long)]
        to: Option<String>,

        /// Print the results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show descriptive statistics for a period
    Profile {
        /// Transaction CSV (date, amount, category columns)
        #[arg(short, long)]
        file: PathBuf,

        /// Time period: this-month, last-month, last-30-days
        #[arg(long, default_value = "last-30-days")]
        period: String,

        /// Custom start date (YYYY-MM-DD) - overrides period
        #[arg(long)]
        from: Option<String>,

        /// Custom end date (YYYY-MM-DD) - overrides period
        #[arg(long)]
        to: Option<String>,

        /// Profile a single category instead of all spending
        #[arg(short, long)]
        category: Option<String>,

        /// Print the profile as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect engine configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the override file location
    Path,
}
