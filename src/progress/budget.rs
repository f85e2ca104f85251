use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::BudgetState;

#[derive(Debug, Clone)]
pub struct BudgetMetrics {
    /// amount - spent; negative when over budget.
    pub remaining_amount: Decimal,
    /// spent / amount * 100, total-based across all call sites.
    pub progress_percentage: f64,
    /// end_date - today in days; zero or negative once the period ends.
    pub days_remaining: i64,
    /// remaining / max(days_remaining, 1) while the period is running,
    /// None once it has ended.
    pub daily_budget: Option<Decimal>,
    pub is_over_budget: bool,
    pub needs_alert: bool,
    pub state: BudgetState,
}

/// Derives all budget figures from the stored fields, the expense aggregate
/// over the budget's category and period, and today's date. amount = 0 is
/// rejected at creation time and never reaches this function.
pub fn evaluate(
    amount: Decimal,
    alert_threshold: Decimal,
    start_date: NaiveDate,
    end_date: NaiveDate,
    spent_amount: Decimal,
    today: NaiveDate,
) -> BudgetMetrics {
    let remaining_amount = amount - spent_amount;

    let pct = if amount.is_zero() {
        Decimal::ZERO
    } else {
        spent_amount / amount * Decimal::from(100)
    };
    let progress_percentage = pct.to_f64().unwrap_or(0.0);

    let days_remaining = (end_date - today).num_days();
    let daily_budget = if today > end_date {
        None
    } else {
        Some(remaining_amount / Decimal::from(days_remaining.max(1)))
    };

    let is_over_budget = spent_amount > amount;
    // Threshold comparison is boundary inclusive.
    let needs_alert = pct >= alert_threshold;

    let state = classify(today, start_date, end_date, pct, alert_threshold);

    BudgetMetrics {
        remaining_amount,
        progress_percentage,
        days_remaining,
        daily_budget,
        is_over_budget,
        needs_alert,
        state,
    }
}

/// Maps the spent percentage and dates onto the budget lifecycle state.
/// Pure function of its inputs; nothing is stored between evaluations.
fn classify(
    today: NaiveDate,
    start_date: NaiveDate,
    end_date: NaiveDate,
    spent_pct: Decimal,
    alert_threshold: Decimal,
) -> BudgetState {
    if today < start_date {
        return BudgetState::Upcoming;
    }
    if today > end_date {
        return if spent_pct > Decimal::from(100) {
            BudgetState::Exceeded
        } else {
            BudgetState::Achieved
        };
    }
    if spent_pct >= alert_threshold {
        BudgetState::Warning
    } else {
        BudgetState::Ongoing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_at_threshold_alerts_but_not_over() {
        // amount 1000, threshold 80%, spent 800
        let m = evaluate(
            Decimal::from(1000),
            Decimal::from(80),
            date(2024, 1, 1),
            date(2024, 1, 31),
            Decimal::from(800),
            date(2024, 1, 15),
        );
        assert_eq!(m.progress_percentage, 80.0);
        assert!(m.needs_alert);
        assert!(!m.is_over_budget);
        assert_eq!(m.state, BudgetState::Warning);
    }

    #[test]
    fn test_below_threshold_is_ongoing() {
        let m = evaluate(
            Decimal::from(1000),
            Decimal::from(80),
            date(2024, 1, 1),
            date(2024, 1, 31),
            Decimal::from(500),
            date(2024, 1, 15),
        );
        assert!(!m.needs_alert);
        assert!(!m.is_over_budget);
        assert_eq!(m.state, BudgetState::Ongoing);
        assert_eq!(m.remaining_amount, Decimal::from(500));
    }

    #[test]
    fn test_spending_past_amount_is_over_budget() {
        let m = evaluate(
            Decimal::from(1000),
            Decimal::from(80),
            date(2024, 1, 1),
            date(2024, 1, 31),
            Decimal::from(1200),
            date(2024, 1, 20),
        );
        assert!(m.is_over_budget);
        assert!(m.needs_alert);
        assert_eq!(m.remaining_amount, Decimal::from(-200));
        assert_eq!(m.state, BudgetState::Warning);
    }

    #[test]
    fn test_upcoming_before_start() {
        let m = evaluate(
            Decimal::from(1000),
            Decimal::from(80),
            date(2024, 2, 1),
            date(2024, 2, 29),
            Decimal::ZERO,
            date(2024, 1, 15),
        );
        assert_eq!(m.state, BudgetState::Upcoming);
    }

    #[test]
    fn test_start_and_end_days_are_inside_the_period() {
        let start = date(2024, 1, 1);
        let end = date(2024, 1, 31);
        let amount = Decimal::from(1000);
        let threshold = Decimal::from(80);

        let on_start = evaluate(amount, threshold, start, end, Decimal::ZERO, start);
        assert_eq!(on_start.state, BudgetState::Ongoing);

        let on_end = evaluate(amount, threshold, start, end, Decimal::ZERO, end);
        assert_eq!(on_end.state, BudgetState::Ongoing);
        assert!(on_end.daily_budget.is_some());
    }

    #[test]
    fn test_ended_within_amount_is_achieved() {
        let m = evaluate(
            Decimal::from(1000),
            Decimal::from(80),
            date(2024, 1, 1),
            date(2024, 1, 31),
            Decimal::from(1000),
            date(2024, 2, 5),
        );
        // exactly 100% counts as achieved, not exceeded
        assert_eq!(m.state, BudgetState::Achieved);
        assert_eq!(m.daily_budget, None);
        assert!(m.days_remaining < 0);
    }

    #[test]
    fn test_ended_over_amount_is_exceeded() {
        let m = evaluate(
            Decimal::from(1000),
            Decimal::from(80),
            date(2024, 1, 1),
            date(2024, 1, 31),
            Decimal::from(1001),
            date(2024, 2, 5),
        );
        assert_eq!(m.state, BudgetState::Exceeded);
        assert_eq!(m.daily_budget, None);
    }

    #[test]
    fn test_daily_budget_spreads_remaining_over_days_left() {
        let m = evaluate(
            Decimal::from(1000),
            Decimal::from(80),
            date(2024, 1, 1),
            date(2024, 1, 31),
            Decimal::from(400),
            date(2024, 1, 21),
        );
        assert_eq!(m.days_remaining, 10);
        assert_eq!(m.daily_budget, Some(Decimal::from(60)));
    }

    #[test]
    fn test_daily_budget_on_final_day_uses_one_day() {
        let end = date(2024, 1, 31);
        let m = evaluate(
            Decimal::from(1000),
            Decimal::from(80),
            date(2024, 1, 1),
            end,
            Decimal::from(700),
            end,
        );
        assert_eq!(m.days_remaining, 0);
        assert_eq!(m.daily_budget, Some(Decimal::from(300)));
    }
}
