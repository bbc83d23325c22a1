//! Statistics core
//!
//! Pure numeric primitives used by the forecast engine. Every function is
//! total: degenerate input (empty series, zero mean, a single point) returns a
//! documented sentinel instead of NaN or a panic.

use serde::{Deserialize, Serialize};

use crate::aggregate::weekday_averages;
use crate::config::ClassifierConfig;
use crate::models::{DailySeries, SpendingType};

/// Arithmetic mean and population standard deviation. `(0, 0)` for an empty series.
pub fn mean_stdev(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Least-squares line through `(index, value)` points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
}

impl Regression {
    /// Fitted value at day index `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Ordinary least-squares fit of value against day index (0-based).
///
/// With fewer than two points no trend can be established: the result is a
/// flat line through the single value, or through zero for an empty series.
pub fn linear_regression(values: &[f64]) -> Regression {
    match values {
        [] => Regression {
            slope: 0.0,
            intercept: 0.0,
        },
        [only] => Regression {
            slope: 0.0,
            intercept: *only,
        },
        _ => {
            let n = values.len() as f64;
            let x_mean = (n - 1.0) / 2.0;
            let y_mean = values.iter().sum::<f64>() / n;

            let mut num = 0.0;
            let mut den = 0.0;
            for (i, &y) in values.iter().enumerate() {
                let dx = i as f64 - x_mean;
                num += dx * (y - y_mean);
                den += dx * dx;
            }

            let slope = num / den;
            Regression {
                slope,
                intercept: y_mean - slope * x_mean,
            }
        }
    }
}

/// Running totals of `values`
pub fn cumulative(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0, |acc, v| {
            *acc += v;
            Some(*acc)
        })
        .collect()
}

/// Linearly increasing recency weight: the oldest point weighs 1, the newest `len`.
pub fn linear_recency_weight(index: usize, _len: usize) -> f64 {
    (index + 1) as f64
}

/// Weighted average favoring recent points.
///
/// `weight_fn(index, len)` must be non-negative and non-decreasing in `index`
/// (index 0 is the oldest point). Returns 0 for an empty series or when all
/// weights are zero.
pub fn weighted_moving_average<F>(values: &[f64], weight_fn: F) -> f64
where
    F: Fn(usize, usize) -> f64,
{
    let len = values.len();
    let mut weighted = 0.0;
    let mut total_weight = 0.0;
    for (i, v) in values.iter().enumerate() {
        let w = weight_fn(i, len);
        weighted += w * v;
        total_weight += w;
    }
    if total_weight <= 0.0 {
        return 0.0;
    }
    weighted / total_weight
}

/// Standard deviation over mean; a zero-mean series has zero volatility.
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    let (mean, stdev) = mean_stdev(values);
    if mean.abs() < f64::EPSILON {
        return 0.0;
    }
    stdev / mean
}

/// `z * stdev / sqrt(n)` with `n` floored at 1
pub fn confidence_interval_width(values: &[f64], z: f64) -> f64 {
    let (_, stdev) = mean_stdev(values);
    let n = values.len().max(1) as f64;
    z * stdev / n.sqrt()
}

/// Per-weekday ratio of average spend to overall average, Monday first.
///
/// Weekdays with no observations, and every weekday of a zero-mean series,
/// get the neutral index 1.0.
pub fn weekday_seasonality(series: &DailySeries) -> [f64; 7] {
    let (overall, _) = mean_stdev(&series.values());
    if overall.abs() < f64::EPSILON {
        return [1.0; 7];
    }

    let mut index = [1.0; 7];
    for (slot, average) in index.iter_mut().zip(weekday_averages(series)) {
        if let Some(average) = average {
            *slot = average / overall;
        }
    }
    index
}

/// Distance between the strongest and weakest weekday index
pub fn seasonality_spread(index: &[f64; 7]) -> f64 {
    let max = index.iter().copied().fold(f64::MIN, f64::max);
    let min = index.iter().copied().fold(f64::MAX, f64::min);
    max - min
}

/// Classify a series as steady, volatile or seasonal.
///
/// Low variation is steady and high variation is volatile. Moderate variation
/// is seasonal when the weekday index spread exceeds the configured threshold;
/// moderate variation with no weekday structure counts as volatile.
pub fn classify_spending_type(series: &DailySeries, config: &ClassifierConfig) -> SpendingType {
    let cv = coefficient_of_variation(&series.values());
    if cv < config.steady_max_cv {
        return SpendingType::Steady;
    }
    if cv > config.volatile_min_cv {
        return SpendingType::Volatile;
    }
    if seasonality_spread(&weekday_seasonality(series)) > config.seasonal_min_spread {
        SpendingType::Seasonal
    } else {
        SpendingType::Volatile
    }
}

/// Descriptive summary of one daily series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesProfile {
    pub days: usize,
    pub total: f64,
    pub mean: f64,
    pub stdev: f64,
    pub coefficient_of_variation: f64,
    pub slope: f64,
    /// Monday first
    pub seasonality: [f64; 7],
    pub spending_type: SpendingType,
}

impl SeriesProfile {
    pub fn from_series(series: &DailySeries, config: &ClassifierConfig) -> Self {
        let values = series.values();
        let (mean, stdev) = mean_stdev(&values);
        Self {
            days: values.len(),
            total: series.total(),
            mean,
            stdev,
            coefficient_of_variation: coefficient_of_variation(&values),
            slope: linear_regression(&values).slope,
            seasonality: weekday_seasonality(series),
            spending_type: classify_spending_type(series, config),
        }
    }
}
