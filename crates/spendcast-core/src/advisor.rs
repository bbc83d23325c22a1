//! Budget advisor
//!
//! Derives the remaining daily allowance from a forecast and a spending limit.
//! A negative allowance means the limit is already exceeded; it is reported
//! as-is rather than treated as an error.

use serde::{Deserialize, Serialize};

use crate::models::ForecastResult;

/// Advice for one budget limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetAdvice {
    pub budget_limit: i64,
    /// `(budget_limit - current_spent) / max(1, days_remaining)`
    pub predicted_daily_budget: i64,
    /// `predicted_total - budget_limit`; negative means headroom
    pub projected_overrun: i64,
}

impl BudgetAdvice {
    /// True when the forecast lands above the limit
    pub fn is_over_pace(&self) -> bool {
        self.projected_overrun > 0
    }
}

/// Spend per remaining day that still fits `budget_limit`
pub fn predicted_daily_budget(budget_limit: i64, current_spent: i64, days_remaining: u32) -> i64 {
    let days = days_remaining.max(1) as f64;
    ((budget_limit - current_spent) as f64 / days).round() as i64
}

/// Advice from raw forecast figures
pub fn advise(
    budget_limit: i64,
    current_spent: i64,
    predicted_total: i64,
    days_remaining: u32,
) -> BudgetAdvice {
    BudgetAdvice {
        budget_limit,
        predicted_daily_budget: predicted_daily_budget(budget_limit, current_spent, days_remaining),
        projected_overrun: predicted_total - budget_limit,
    }
}

/// Re-derive advice for a different limit without recomputing the forecast
pub fn advise_for(result: &ForecastResult, budget_limit: i64) -> BudgetAdvice {
    advise(
        budget_limit,
        result.current_spent,
        result.predicted_total,
        result.days_remaining,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SpendingType;

    #[test]
    fn test_daily_budget_under_limit() {
        assert_eq!(predicted_daily_budget(2000, 1800, 2), 100);
    }

    #[test]
    fn test_daily_budget_over_limit_is_negative() {
        assert_eq!(predicted_daily_budget(2000, 2200, 2), -100);
    }

    #[test]
    fn test_daily_budget_last_day_uses_one_day() {
        assert_eq!(predicted_daily_budget(5000, 4000, 0), 1000);
        assert_eq!(predicted_daily_budget(5000, 4000, 1), 1000);
    }

    #[test]
    fn test_advise_overrun() {
        let advice = advise(30000, 12000, 33000, 15);
        assert_eq!(advice.predicted_daily_budget, 1200);
        assert_eq!(advice.projected_overrun, 3000);
        assert!(advice.is_over_pace());

        let advice = advise(30000, 12000, 25000, 15);
        assert_eq!(advice.projected_overrun, -5000);
        assert!(!advice.is_over_pace());
    }

    #[test]
    fn test_advise_for_existing_forecast() {
        let result = ForecastResult {
            current_spent: 1800,
            predicted_total: 2000,
            predicted_daily_budget: None,
            days_elapsed: 28,
            days_remaining: 2,
            confidence: 80,
            spending_type: SpendingType::Steady,
            breakdown: vec![],
            budget_limit: None,
            projected_overrun: None,
        };

        let advice = advise_for(&result, 2000);
        assert_eq!(advice.predicted_daily_budget, 100);
        assert_eq!(advice.projected_overrun, 0);
    }
}
