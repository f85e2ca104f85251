//! Derived budget and savings-goal figures.
//!
//! Everything in this module is a pure function of (today, stored fields,
//! transaction aggregates). No derived value is ever persisted, so two
//! concurrent reads always agree with the underlying rows.

pub mod budget;
pub mod savings;

use rust_decimal::Decimal;
use sqlx::FromRow;

/// Income and expense sums over a date range. Missing rows yield zero.
#[derive(Debug, Clone, FromRow)]
pub struct PeriodTotals {
    pub total_income: Decimal,
    pub total_expense: Decimal,
}
