//! Spendcast Core Library
//!
//! Statistical spending forecasts from an account's transaction history:
//! - Aggregation of raw transactions into zero-filled daily series
//! - Statistics primitives (regression, weighted averages, seasonality)
//! - Month-end forecast blending trend and recency estimates
//! - Budget advice derived from a forecast and a spending limit
//! - Benchmark comparison against a reference population
//! - CSV import and TOML configuration
//!
//! The numeric engine is pure: it reads no clock, touches no storage and
//! never fails on degenerate input.

pub mod advisor;
pub mod aggregate;
pub mod benchmark;
pub mod config;
pub mod error;
pub mod forecast;
pub mod import;
pub mod models;
pub mod stats;

/// Fixture builders for tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use advisor::BudgetAdvice;
pub use aggregate::aggregate;
pub use benchmark::BenchmarkComparator;
pub use config::{BenchmarkConfig, ClassifierConfig, EngineConfig, ForecastConfig};
pub use error::{Error, Result};
pub use forecast::{ForecastEngine, ForecastPeriod};
pub use models::{
    AggregatedSeries, BenchmarkResult, BenchmarkStatus, CategoryBreakdown, DailySeries,
    DateRange, ForecastResult, SpendingType, TimeSeriesPoint, TransactionRecord, Trend,
};
pub use stats::SeriesProfile;
