use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::PeriodTotals;
use crate::models::{GoalState, GoalStatus};

#[derive(Debug, Clone)]
pub struct SavingsProgress {
    /// total_income - total_expense; may be negative.
    pub actual_savings: Decimal,
    /// Amount still needed; floored at zero once overachieved.
    pub remaining_amount: Decimal,
    /// Display percentage, clamped at zero.
    pub progress_percentage: f64,
    pub status: GoalStatus,
}

/// Derives goal progress from the aggregates over [start_date, target_date].
///
/// Completion compares the unclamped savings figure against the target;
/// only the displayed percentage is clamped. target_amount = 0 is rejected
/// at creation time and never reaches this function.
pub fn compute(target_amount: Decimal, totals: &PeriodTotals) -> SavingsProgress {
    let actual_savings = totals.total_income - totals.total_expense;

    let status = if actual_savings >= target_amount {
        GoalStatus::Completed
    } else {
        GoalStatus::Active
    };

    let progress_percentage = if target_amount.is_zero() {
        0.0
    } else {
        (actual_savings / target_amount * Decimal::from(100))
            .to_f64()
            .unwrap_or(0.0)
            .max(0.0)
    };

    let remaining_amount = (target_amount - actual_savings).max(Decimal::ZERO);

    SavingsProgress {
        actual_savings,
        remaining_amount,
        progress_percentage,
        status,
    }
}

/// Lifecycle state relative to the target date, recomputed per read.
pub fn classify(today: NaiveDate, target_date: NaiveDate, status: GoalStatus) -> GoalState {
    match status {
        GoalStatus::Completed => GoalState::Completed,
        GoalStatus::Active if today > target_date => GoalState::Incomplete,
        GoalStatus::Active => GoalState::Ongoing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(income: i64, expense: i64) -> PeriodTotals {
        PeriodTotals {
            total_income: Decimal::from(income),
            total_expense: Decimal::from(expense),
        }
    }

    #[test]
    fn test_partial_progress() {
        // income 6000, expense 2000, target 5000 -> 4000 saved, 80%, active
        let progress = compute(Decimal::from(5000), &totals(6000, 2000));
        assert_eq!(progress.actual_savings, Decimal::from(4000));
        assert_eq!(progress.progress_percentage, 80.0);
        assert_eq!(progress.remaining_amount, Decimal::from(1000));
        assert_eq!(progress.status, GoalStatus::Active);
    }

    #[test]
    fn test_exactly_at_target_is_completed() {
        let progress = compute(Decimal::from(3000), &totals(5000, 2000));
        assert_eq!(progress.progress_percentage, 100.0);
        assert_eq!(progress.status, GoalStatus::Completed);
        assert_eq!(progress.remaining_amount, Decimal::ZERO);
    }

    #[test]
    fn test_overachieved_remaining_floors_at_zero() {
        let progress = compute(Decimal::from(1000), &totals(5000, 1000));
        assert_eq!(progress.status, GoalStatus::Completed);
        assert_eq!(progress.remaining_amount, Decimal::ZERO);
        assert!(progress.progress_percentage > 100.0);
    }

    #[test]
    fn test_negative_savings_clamped_for_display_only() {
        let progress = compute(Decimal::from(1000), &totals(100, 500));
        assert_eq!(progress.actual_savings, Decimal::from(-400));
        assert_eq!(progress.progress_percentage, 0.0);
        assert_eq!(progress.status, GoalStatus::Active);
        assert_eq!(progress.remaining_amount, Decimal::from(1400));
    }

    #[test]
    fn test_empty_aggregates_yield_zero() {
        let progress = compute(Decimal::from(500), &totals(0, 0));
        assert_eq!(progress.actual_savings, Decimal::ZERO);
        assert_eq!(progress.progress_percentage, 0.0);
        assert_eq!(progress.status, GoalStatus::Active);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let t = totals(6000, 2000);
        let a = compute(Decimal::from(5000), &t);
        let b = compute(Decimal::from(5000), &t);
        assert_eq!(a.actual_savings, b.actual_savings);
        assert_eq!(a.progress_percentage, b.progress_percentage);
        assert_eq!(a.status, b.status);
    }

    #[test]
    fn test_classify_before_target_date() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let target = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(classify(today, target, GoalStatus::Active), GoalState::Ongoing);
    }

    #[test]
    fn test_classify_on_target_date_still_ongoing() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(classify(day, day, GoalStatus::Active), GoalState::Ongoing);
    }

    #[test]
    fn test_classify_past_target_date() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        let target = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(classify(today, target, GoalStatus::Active), GoalState::Incomplete);
        assert_eq!(classify(today, target, GoalStatus::Completed), GoalState::Completed);
    }
}
