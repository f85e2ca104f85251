use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SavingsGoal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub target_amount: Decimal,
    pub currency: String,
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
    pub priority: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateGoalRequest {
    pub name: String,
    pub target_amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
    #[serde(default = "default_priority")]
    pub priority: String,
    #[serde(default)]
    pub description: String,
}

fn default_currency() -> String {
    "USD".into()
}

fn default_priority() -> String {
    "medium".into()
}

#[derive(Debug, Deserialize)]
pub struct UpdateGoalRequest {
    pub name: Option<String>,
    pub target_amount: Option<f64>,
    pub target_date: Option<NaiveDate>,
    pub priority: Option<String>,
    pub description: Option<String>,
}

/// Completion status: Completed iff actual savings reached the target at
/// the last computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GoalStatus {
    Active,
    Completed,
}

/// Lifecycle state of a goal relative to its target date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalState {
    Ongoing,
    Completed,
    Incomplete,
}

/// Income/expense sums backing a goal's progress figures.
#[derive(Debug, Serialize)]
pub struct PeriodDetails {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub actual_savings: Decimal,
}

/// Goal with progress derived at read time from the transaction aggregates
/// over [start_date, target_date]. current_amount is never read back from
/// storage as authoritative.
#[derive(Debug, Serialize)]
pub struct GoalView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub currency: String,
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
    pub priority: String,
    pub description: String,
    pub status: GoalStatus,
    pub state: GoalState,
    pub progress_percentage: f64,
    pub remaining_amount: Decimal,
    pub period_details: PeriodDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CreateGoalResponse {
    pub message: String,
    pub goal_id: Uuid,
    pub actual_savings: Decimal,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub progress_percentage: f64,
}
