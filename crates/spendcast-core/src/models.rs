//! Domain models for spendcast

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Category assigned to records that arrive without one
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A spending record as read from the datastore snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub timestamp: DateTime<Utc>,
    /// Integer minor currency units (cents)
    pub amount: i64,
    pub category: String,
}

impl TransactionRecord {
    pub fn new(timestamp: DateTime<Utc>, amount: i64, category: impl Into<String>) -> Self {
        Self {
            timestamp,
            amount,
            category: category.into(),
        }
    }

    /// Record stamped at midnight UTC of `date`
    pub fn on_date(date: NaiveDate, amount: i64, category: impl Into<String>) -> Self {
        Self::new(date.and_time(NaiveTime::MIN).and_utc(), amount, category)
    }

    /// Calendar day the record is bucketed into
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

/// Inclusive calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of calendar days covered (0 when `end` precedes `start`)
    pub fn num_days(&self) -> usize {
        let days = (self.end - self.start).num_days() + 1;
        days.max(0) as usize
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Every day of the range in calendar order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

/// One day's value in a series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Contiguous, calendar-ordered daily series.
///
/// No-spend days are explicit zero points so regression and moving-average
/// weighting see the real spacing between purchases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    points: Vec<TimeSeriesPoint>,
}

impl DailySeries {
    /// A series of zero-value points covering `range`
    pub fn zeroed(range: &DateRange) -> Self {
        Self {
            points: range
                .days()
                .map(|date| TimeSeriesPoint { date, value: 0.0 })
                .collect(),
        }
    }

    /// Build a series from consecutive daily values starting at `start`
    pub fn from_values(start: NaiveDate, values: &[f64]) -> Self {
        Self {
            points: start
                .iter_days()
                .zip(values.iter())
                .map(|(date, &value)| TimeSeriesPoint { date, value })
                .collect(),
        }
    }

    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.value).sum()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Values grouped by weekday, Monday first
    pub fn by_weekday(&self) -> [Vec<f64>; 7] {
        let mut groups: [Vec<f64>; 7] = Default::default();
        for point in &self.points {
            groups[point.date.weekday().num_days_from_monday() as usize].push(point.value);
        }
        groups
    }

    /// Add `amount` to the point for `date`. Dates outside the series are ignored.
    pub(crate) fn add(&mut self, date: NaiveDate, amount: f64) {
        let Some(first) = self.first_date() else {
            return;
        };
        let offset = (date - first).num_days();
        if offset < 0 {
            return;
        }
        if let Some(point) = self.points.get_mut(offset as usize) {
            point.value += amount;
        }
    }
}

/// Aggregator output: the account-wide series plus one series per category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedSeries {
    pub range: DateRange,
    pub total: DailySeries,
    pub by_category: BTreeMap<String, DailySeries>,
}

impl AggregatedSeries {
    pub fn category(&self, name: &str) -> Option<&DailySeries> {
        self.by_category.get(name)
    }

    /// Summed spend per category over the whole range
    pub fn category_totals(&self) -> BTreeMap<String, f64> {
        self.by_category
            .iter()
            .map(|(name, series)| (name.clone(), series.total()))
            .collect()
    }
}

/// Direction of a category's daily spend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Flat => "flat",
        }
    }
}

impl std::str::FromStr for Trend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "flat" => Ok(Self::Flat),
            _ => Err(format!("Unknown trend: {}", s)),
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shape of a spending series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpendingType {
    /// Low day-to-day variation
    Steady,
    /// High variation with no weekday structure
    Volatile,
    /// Moderate variation explained by a day-of-week pattern
    Seasonal,
}

impl SpendingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Steady => "steady",
            Self::Volatile => "volatile",
            Self::Seasonal => "seasonal",
        }
    }
}

impl std::str::FromStr for SpendingType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "steady" => Ok(Self::Steady),
            "volatile" => Ok(Self::Volatile),
            "seasonal" => Ok(Self::Seasonal),
            _ => Err(format!("Unknown spending type: {}", s)),
        }
    }
}

impl std::fmt::Display for SpendingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Benchmark bucket derived from the percentile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BenchmarkStatus {
    /// Percentile <= 25
    Excellent,
    /// Percentile <= 50
    Good,
    /// Percentile <= 75
    Average,
    /// Percentile > 75
    High,
}

impl BenchmarkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Average => "average",
            Self::High => "high",
        }
    }

    pub fn from_percentile(percentile: u8) -> Self {
        match percentile {
            0..=25 => Self::Excellent,
            26..=50 => Self::Good,
            51..=75 => Self::Average,
            _ => Self::High,
        }
    }
}

impl std::str::FromStr for BenchmarkStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "excellent" => Ok(Self::Excellent),
            "good" => Ok(Self::Good),
            "average" => Ok(Self::Average),
            "high" => Ok(Self::High),
            _ => Err(format!("Unknown benchmark status: {}", s)),
        }
    }
}

impl std::fmt::Display for BenchmarkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-category slice of a forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub spent: i64,
    pub predicted_total: i64,
    pub trend: Trend,
    /// Least-squares slope of the category's daily spend (minor units per day)
    pub slope: f64,
    pub spending_type: SpendingType,
}

/// Month-end projection for one account.
///
/// Currency fields are integer minor units. `confidence` is a 0-100 score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub current_spent: i64,
    pub predicted_total: i64,
    /// Remaining spend per day that still fits the budget; negative once overspent.
    /// Present only when a budget limit was supplied.
    pub predicted_daily_budget: Option<i64>,
    pub days_elapsed: u32,
    pub days_remaining: u32,
    pub confidence: u8,
    pub spending_type: SpendingType,
    pub breakdown: Vec<CategoryBreakdown>,
    pub budget_limit: Option<i64>,
    /// `predicted_total - budget_limit`; negative means headroom
    pub projected_overrun: Option<i64>,
}

/// One category compared against the reference population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub category: String,
    pub user_amount: i64,
    pub reference_amount: i64,
    /// Always within 1..=99
    pub percentile: u8,
    pub potential_savings: i64,
    pub status: BenchmarkStatus,
}
