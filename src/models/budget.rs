use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Budget {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub amount: Decimal,
    pub currency: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rollover_unused: bool,
    pub alert_threshold: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBudgetRequest {
    pub category_id: Uuid,
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub rollover_unused: bool,
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold: f64,
}

fn default_currency() -> String {
    "USD".into()
}

fn default_alert_threshold() -> f64 {
    80.0
}

#[derive(Debug, Deserialize)]
pub struct UpdateBudgetRequest {
    pub amount: Option<f64>,
    pub alert_threshold: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct CreateBudgetResponse {
    pub message: String,
    pub budget_id: Uuid,
}

/// Budget row joined with its category name, per-period expense sum and
/// distinct spending days, as fetched by the listing query.
#[derive(Debug, FromRow)]
pub struct BudgetSpendRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub amount: Decimal,
    pub currency: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rollover_unused: bool,
    pub alert_threshold: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category_name: Option<String>,
    pub spent_amount: Decimal,
    pub days_with_expenses: i64,
}

/// Budget with all metrics derived at read time. Nothing here is persisted;
/// the view is recomputed from the transaction rows on every query.
#[derive(Debug, Serialize)]
pub struct BudgetView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub category_name: Option<String>,
    pub amount: Decimal,
    pub currency: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rollover_unused: bool,
    pub alert_threshold: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub spent_amount: Decimal,
    pub remaining_amount: Decimal,
    pub progress_percentage: f64,
    pub days_remaining: i64,
    pub days_with_expenses: i64,
    pub total_days: i64,
    /// None once the budget period has ended.
    pub daily_budget: Option<Decimal>,
    pub is_over_budget: bool,
    pub needs_alert: bool,
    pub state: BudgetState,
}

/// Lifecycle state of a budget, derived fresh on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetState {
    Upcoming,
    Ongoing,
    Warning,
    Achieved,
    Exceeded,
}
