use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Income or expense. Stored as lowercase text in the `kind` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub kind: String,
    pub amount: Decimal,
    pub currency: String,
    pub payment_method_id: Option<Uuid>,
    pub transaction_date: DateTime<Utc>,
    pub description: String,
    pub is_recurring: bool,
    pub recurrence_interval: Option<String>,
    pub receipt_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub category_id: Uuid,
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub payment_method_id: Option<Uuid>,
    pub transaction_date: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_recurring: bool,
    pub recurrence_interval: Option<String>,
    pub receipt_url: Option<String>,
}

fn default_currency() -> String {
    "USD".into()
}

/// Transaction row joined with category and payment-method names,
/// as returned by the income/expense listing endpoints.
#[derive(Debug, Serialize, FromRow)]
pub struct TransactionRecord {
    pub id: Uuid,
    pub amount: Decimal,
    pub currency: String,
    pub transaction_date: DateTime<Utc>,
    pub description: String,
    pub is_recurring: bool,
    pub recurrence_interval: Option<String>,
    pub receipt_url: Option<String>,
    pub category_name: Option<String>,
    pub payment_method_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateTransactionResponse {
    pub message: String,
    pub id: Uuid,
}

/// Per-currency expense total.
#[derive(Debug, Serialize, FromRow)]
pub struct CurrencyTotal {
    pub currency: String,
    pub total: Decimal,
}
