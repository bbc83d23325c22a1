//! Forecast engine
//!
//! Projects a month-end total from a partial month of daily spend:
//! - a trend estimate from a least-squares fit of the running total
//! - a recency estimate from a linearly weighted moving average
//! - a blend of the two that trusts the trend more as days accumulate
//! - a weekday seasonal offset applied to each remaining calendar day
//!
//! The current date is always a parameter; nothing here reads the clock.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::advisor;
use crate::aggregate::aggregate;
use crate::config::{ClassifierConfig, EngineConfig, ForecastConfig};
use crate::models::{
    AggregatedSeries, CategoryBreakdown, DailySeries, DateRange, ForecastResult,
    TransactionRecord, Trend,
};
use crate::stats::{
    classify_spending_type, coefficient_of_variation, confidence_interval_width, cumulative,
    linear_recency_weight, linear_regression, mean_stdev, weekday_seasonality,
    weighted_moving_average,
};

/// The calendar month containing `today`, split at `today`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub today: NaiveDate,
    /// Days from the start of the month through `today`, inclusive
    pub days_elapsed: u32,
    /// Days after `today` through the end of the month
    pub days_remaining: u32,
}

impl ForecastPeriod {
    pub fn month_of(today: NaiveDate) -> Self {
        let start = today - Duration::days(today.day0() as i64);
        let length = days_in_month(today.year(), today.month());
        let end = start + Duration::days(length as i64 - 1);
        Self {
            start,
            end,
            today,
            days_elapsed: today.day(),
            days_remaining: length - today.day(),
        }
    }

    /// Days with observed data
    pub fn observed_range(&self) -> DateRange {
        DateRange::new(self.start, self.today)
    }

    pub fn full_range(&self) -> DateRange {
        DateRange::new(self.start, self.end)
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
    }
}

/// Daily burn rate from the slope of the running total (0 with fewer than two days).
///
/// The slope is a weighted average of daily values with non-negative weights,
/// so raising any single day never lowers the rate. Fitting the daily values
/// directly does not have this property: raising an early day tilts the line
/// down and can lower the forecast.
pub fn trend_daily_rate(values: &[f64]) -> f64 {
    linear_regression(&cumulative(values)).slope
}

/// Spent so far plus the running-total fit extrapolated `days_remaining` days
pub fn trend_estimate(values: &[f64], days_remaining: u32) -> f64 {
    values.iter().sum::<f64>() + trend_daily_rate(values) * days_remaining as f64
}

/// Daily rate from the recency-weighted moving average
pub fn recency_daily_rate(values: &[f64]) -> f64 {
    weighted_moving_average(values, linear_recency_weight)
}

/// Spent so far plus the recency rate held for `days_remaining` days
pub fn recency_estimate(values: &[f64], days_remaining: u32) -> f64 {
    values.iter().sum::<f64>() + recency_daily_rate(values) * days_remaining as f64
}

/// Weight of the trend estimate: `min(1, days_elapsed / full_trust_days)`
pub fn trend_blend_weight(days_elapsed: u32, full_trust_days: u32) -> f64 {
    let full = full_trust_days.max(1) as f64;
    (days_elapsed as f64 / full).clamp(0.0, 1.0)
}

/// Scale in `[0, 1]` for figures derived from fewer than `cold_start_days` days
pub fn cold_start_factor(days_elapsed: u32, cold_start_days: u32) -> f64 {
    if cold_start_days == 0 || days_elapsed >= cold_start_days {
        return 1.0;
    }
    days_elapsed as f64 / cold_start_days as f64
}

/// Spend expected over the `days_remaining` days following the series.
///
/// Each remaining day gets `daily_rate` plus its weekday's seasonal offset
/// (`mean * (index - 1)`), floored at zero. The offset is damped by
/// `min(1, observed_days / days_remaining)`: a short history cannot reshape a
/// long horizon, and the projection stays non-decreasing in every observed value.
pub fn seasonal_projection(series: &DailySeries, daily_rate: f64, days_remaining: u32) -> f64 {
    if days_remaining == 0 {
        return 0.0;
    }
    let Some(last) = series.last_date() else {
        return daily_rate.max(0.0) * days_remaining as f64;
    };

    let (mean, _) = mean_stdev(&series.values());
    let index = weekday_seasonality(series);
    let damping = (series.len() as f64 / days_remaining as f64).min(1.0);

    (1..=days_remaining as i64)
        .map(|offset| {
            let weekday = (last + Duration::days(offset))
                .weekday()
                .num_days_from_monday() as usize;
            let seasonal = damping * mean * (index[weekday] - 1.0);
            (daily_rate + seasonal).max(0.0)
        })
        .sum()
}

/// Intermediate figures for one series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub current_spent: f64,
    pub trend_estimate: f64,
    pub recency_estimate: f64,
    pub trend_weight: f64,
    /// Blended daily rate before the weekday adjustment
    pub daily_rate: f64,
    pub predicted_total: f64,
}

/// The forecast engine. Holds only configuration; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct ForecastEngine {
    forecast: ForecastConfig,
    classifier: ClassifierConfig,
}

impl ForecastEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_config(config.forecast.clone(), config.classifier.clone())
    }

    pub fn with_config(forecast: ForecastConfig, classifier: ClassifierConfig) -> Self {
        Self {
            forecast,
            classifier,
        }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.forecast
    }

    /// Forecast the month containing `today` from raw records
    pub fn forecast_month(
        &self,
        records: &[TransactionRecord],
        today: NaiveDate,
        budget_limit: Option<i64>,
    ) -> ForecastResult {
        let period = ForecastPeriod::month_of(today);
        let series = aggregate(records, period.observed_range());
        self.predict_month_total(
            &series,
            period.days_elapsed,
            period.days_remaining,
            budget_limit,
        )
    }

    /// Project the period total from the observed days
    pub fn predict_month_total(
        &self,
        series: &AggregatedSeries,
        days_elapsed: u32,
        days_remaining: u32,
        budget_limit: Option<i64>,
    ) -> ForecastResult {
        let projection = self.project(&series.total, days_elapsed, days_remaining);
        let current_spent = projection.current_spent.round() as i64;
        let predicted_total = if days_remaining == 0 {
            current_spent
        } else {
            (projection.predicted_total.round() as i64).max(current_spent)
        };

        let values = series.total.values();
        let confidence = self.confidence_score(&values, days_elapsed);
        let spending_type = classify_spending_type(&series.total, &self.classifier);
        let breakdown = self.breakdown(series, days_elapsed, days_remaining);

        let advice = budget_limit
            .map(|limit| advisor::advise(limit, current_spent, predicted_total, days_remaining));

        debug!(
            current_spent,
            predicted_total,
            days_elapsed,
            days_remaining,
            confidence,
            trend_weight = projection.trend_weight,
            daily_rate = projection.daily_rate,
            spending_type = spending_type.as_str(),
            "Forecast computed"
        );

        ForecastResult {
            current_spent,
            predicted_total,
            predicted_daily_budget: advice.map(|a| a.predicted_daily_budget),
            days_elapsed,
            days_remaining,
            confidence,
            spending_type,
            breakdown,
            budget_limit,
            projected_overrun: advice.map(|a| a.projected_overrun),
        }
    }

    /// Blend the trend and recency estimates for one series.
    ///
    /// Inside the cold-start window the remaining-days projection is scaled by
    /// [`cold_start_factor`], keeping early forecasts close to what is spent.
    pub fn project(&self, series: &DailySeries, days_elapsed: u32, days_remaining: u32) -> Projection {
        let values = series.values();
        let current_spent: f64 = values.iter().sum();
        let trend_weight = trend_blend_weight(days_elapsed, self.forecast.trend_full_trust_days);
        let daily_rate = trend_weight * trend_daily_rate(&values)
            + (1.0 - trend_weight) * recency_daily_rate(&values);

        let predicted_total = if days_remaining == 0 {
            current_spent
        } else {
            let ramp = cold_start_factor(days_elapsed, self.forecast.cold_start_days);
            current_spent + ramp * seasonal_projection(series, daily_rate, days_remaining)
        };

        Projection {
            current_spent,
            trend_estimate: trend_estimate(&values, days_remaining),
            recency_estimate: recency_estimate(&values, days_remaining),
            trend_weight,
            daily_rate,
            predicted_total,
        }
    }

    /// 0-100 reliability score.
    ///
    /// Starts from `100 - min(100, 100 * (cv + ci_width / mean))`, scales down
    /// linearly while `days_elapsed` is inside the cold-start window, and is
    /// capped when the series carries no spend at all.
    pub fn confidence_score(&self, values: &[f64], days_elapsed: u32) -> u8 {
        let (mean, _) = mean_stdev(values);
        let cv = coefficient_of_variation(values).abs();
        let ci_ratio = if mean.abs() < f64::EPSILON {
            0.0
        } else {
            (confidence_interval_width(values, self.forecast.confidence_z) / mean).abs()
        };

        let mut score = 100.0 - (cv * 100.0 + ci_ratio * 100.0).min(100.0);

        score *= cold_start_factor(days_elapsed, self.forecast.cold_start_days);

        if values.iter().sum::<f64>() <= 0.0 {
            score = score.min(self.forecast.no_data_confidence_cap as f64);
        }

        score.clamp(0.0, 100.0).round() as u8
    }

    /// Direction of a series from its daily slope relative to its mean
    pub fn trend_direction(&self, values: &[f64]) -> Trend {
        let (mean, _) = mean_stdev(values);
        if mean.abs() < f64::EPSILON {
            return Trend::Flat;
        }
        let relative = linear_regression(values).slope / mean.abs();
        if relative > self.forecast.trend_flat_epsilon {
            Trend::Up
        } else if relative < -self.forecast.trend_flat_epsilon {
            Trend::Down
        } else {
            Trend::Flat
        }
    }

    fn breakdown(
        &self,
        series: &AggregatedSeries,
        days_elapsed: u32,
        days_remaining: u32,
    ) -> Vec<CategoryBreakdown> {
        let mut breakdown: Vec<CategoryBreakdown> = series
            .by_category
            .iter()
            .map(|(category, daily)| {
                let values = daily.values();
                let projection = self.project(daily, days_elapsed, days_remaining);
                let spent = projection.current_spent.round() as i64;
                CategoryBreakdown {
                    category: category.clone(),
                    spent,
                    predicted_total: (projection.predicted_total.round() as i64).max(spent),
                    trend: self.trend_direction(&values),
                    slope: linear_regression(&values).slope,
                    spending_type: classify_spending_type(daily, &self.classifier),
                }
            })
            .collect();

        // Largest spend first; category name keeps ties deterministic
        breakdown.sort_by(|a, b| b.spent.cmp(&a.spent).then_with(|| a.category.cmp(&b.category)));
        breakdown
    }
}
