//! Engine configuration
//!
//! Every tunable constant of the forecast engine lives here: the blend horizon,
//! cold-start window, classifier thresholds and the benchmark reference table.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a layered resolution:
//! 1. An explicit path, when given and present
//! 2. The override in the data dir (~/.local/share/spendcast/config/engine.toml)
//! 3. Embedded defaults (compiled into the binary)
//!
//! Files may be partial; omitted keys keep their defaults.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/engine.toml");

/// Forecast engine constants
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastConfig {
    /// Days of data before the trend estimate gets full blend weight
    pub trend_full_trust_days: u32,
    /// Periods shorter than this get a linear confidence penalty
    pub cold_start_days: u32,
    /// Confidence ceiling when there is no spending signal
    pub no_data_confidence_cap: u8,
    /// z value for the confidence interval width
    pub confidence_z: f64,
    /// Relative slope (fraction of mean per day) treated as flat
    pub trend_flat_epsilon: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            trend_full_trust_days: 10,
            cold_start_days: 5,
            no_data_confidence_cap: 20,
            confidence_z: 1.96,
            trend_flat_epsilon: 0.01,
        }
    }
}

/// Spending-type classifier thresholds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifierConfig {
    pub steady_max_cv: f64,
    pub volatile_min_cv: f64,
    /// Minimum weekday index spread (max - min) for a seasonal pattern
    pub seasonal_min_spread: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            steady_max_cv: 0.3,
            volatile_min_cv: 1.0,
            seasonal_min_spread: 0.5,
        }
    }
}

/// Reference population figures for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCategory {
    /// Average spend per period in minor units
    pub average: i64,
    /// Top-quartile spend as a fraction of `average`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_quartile_ratio: Option<f64>,
}

/// Benchmark comparator constants and reference data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkConfig {
    pub sigmoid_steepness: f64,
    pub default_top_quartile_ratio: f64,
    pub categories: BTreeMap<String, ReferenceCategory>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            sigmoid_steepness: 3.0,
            default_top_quartile_ratio: 0.75,
            categories: BTreeMap::new(),
        }
    }
}

impl BenchmarkConfig {
    /// Top-quartile amount for a category, `None` without reference data
    pub fn top_quartile_amount(&self, category: &str) -> Option<i64> {
        self.categories.get(category).map(|reference| {
            let ratio = reference
                .top_quartile_ratio
                .unwrap_or(self.default_top_quartile_ratio);
            (reference.average as f64 * ratio).round() as i64
        })
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EngineConfig {
    pub forecast: ForecastConfig,
    pub classifier: ClassifierConfig,
    pub benchmark: BenchmarkConfig,
}

impl EngineConfig {
    /// The configuration compiled into the binary
    pub fn embedded() -> Result<Self> {
        Self::from_toml(DEFAULT_CONFIG)
    }

    /// Resolve configuration (explicit path, then override file, then embedded)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            if path.exists() {
                debug!(path = %path.display(), "Loading engine config");
                return Self::from_file(path);
            }
            warn!(path = %path.display(), "Config file not found, using defaults");
            return Self::embedded();
        }

        if let Some(default_path) = default_config_path() {
            if default_path.exists() {
                debug!(path = %default_path.display(), "Loading engine config override");
                return Self::from_file(&default_path);
            }
        }

        Self::embedded()
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    /// Parse TOML content over the defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        let mut config = EngineConfig::default();

        if let Some(forecast) = raw.forecast {
            if let Some(days) = forecast.trend_full_trust_days {
                config.forecast.trend_full_trust_days = days;
            }
            if let Some(days) = forecast.cold_start_days {
                config.forecast.cold_start_days = days;
            }
            if let Some(cap) = forecast.no_data_confidence_cap {
                config.forecast.no_data_confidence_cap = cap;
            }
            if let Some(z) = forecast.confidence_z {
                config.forecast.confidence_z = z;
            }
            if let Some(epsilon) = forecast.trend_flat_epsilon {
                config.forecast.trend_flat_epsilon = epsilon;
            }
        }

        if let Some(classifier) = raw.classifier {
            if let Some(cv) = classifier.steady_max_cv {
                config.classifier.steady_max_cv = cv;
            }
            if let Some(cv) = classifier.volatile_min_cv {
                config.classifier.volatile_min_cv = cv;
            }
            if let Some(spread) = classifier.seasonal_min_spread {
                config.classifier.seasonal_min_spread = spread;
            }
        }

        if let Some(benchmark) = raw.benchmark {
            if let Some(steepness) = benchmark.sigmoid_steepness {
                config.benchmark.sigmoid_steepness = steepness;
            }
            if let Some(ratio) = benchmark.default_top_quartile_ratio {
                config.benchmark.default_top_quartile_ratio = ratio;
            }
            if let Some(categories) = benchmark.categories {
                config.benchmark.categories = categories;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot use
    pub fn validate(&self) -> Result<()> {
        let f = &self.forecast;
        if f.trend_full_trust_days == 0 {
            return Err(Error::Config(
                "forecast.trend_full_trust_days must be at least 1".into(),
            ));
        }
        if f.no_data_confidence_cap > 100 {
            return Err(Error::Config(
                "forecast.no_data_confidence_cap must be within 0-100".into(),
            ));
        }
        require_non_negative("forecast.confidence_z", f.confidence_z)?;
        require_non_negative("forecast.trend_flat_epsilon", f.trend_flat_epsilon)?;

        let c = &self.classifier;
        require_non_negative("classifier.steady_max_cv", c.steady_max_cv)?;
        require_non_negative("classifier.volatile_min_cv", c.volatile_min_cv)?;
        require_non_negative("classifier.seasonal_min_spread", c.seasonal_min_spread)?;
        if c.steady_max_cv > c.volatile_min_cv {
            return Err(Error::Config(format!(
                "classifier.steady_max_cv ({}) exceeds classifier.volatile_min_cv ({})",
                c.steady_max_cv, c.volatile_min_cv
            )));
        }

        let b = &self.benchmark;
        require_positive("benchmark.sigmoid_steepness", b.sigmoid_steepness)?;
        require_positive(
            "benchmark.default_top_quartile_ratio",
            b.default_top_quartile_ratio,
        )?;
        for (name, reference) in &b.categories {
            if reference.average < 0 {
                return Err(Error::Config(format!(
                    "benchmark.categories.{}.average must not be negative",
                    name
                )));
            }
            if let Some(ratio) = reference.top_quartile_ratio {
                require_positive(
                    &format!("benchmark.categories.{}.top_quartile_ratio", name),
                    ratio,
                )?;
            }
        }

        Ok(())
    }

    /// Render the effective configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::Config(format!("Failed to render config: {}", e)))
    }
}

fn require_non_negative(key: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::Config(format!(
            "{} must be a finite, non-negative number (got {})",
            key, value
        )));
    }
    Ok(())
}

fn require_positive(key: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::Config(format!(
            "{} must be a finite, positive number (got {})",
            key, value
        )));
    }
    Ok(())
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("spendcast").join("config").join("engine.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    forecast: Option<RawForecast>,
    classifier: Option<RawClassifier>,
    benchmark: Option<RawBenchmark>,
}

#[derive(Debug, Deserialize)]
struct RawForecast {
    trend_full_trust_days: Option<u32>,
    cold_start_days: Option<u32>,
    no_data_confidence_cap: Option<u8>,
    confidence_z: Option<f64>,
    trend_flat_epsilon: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawClassifier {
    steady_max_cv: Option<f64>,
    volatile_min_cv: Option<f64>,
    seasonal_min_spread: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawBenchmark {
    sigmoid_steepness: Option<f64>,
    default_top_quartile_ratio: Option<f64>,
    categories: Option<BTreeMap<String, ReferenceCategory>>,
}
