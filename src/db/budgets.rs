use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Budget, BudgetSpendRow};

pub struct BudgetRepo;

impl BudgetRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        category_id: Uuid,
        amount: Decimal,
        currency: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        rollover_unused: bool,
        alert_threshold: Decimal,
    ) -> Result<Budget, sqlx::Error> {
        let id = Uuid::new_v4();
        sqlx::query_as::<_, Budget>(
            r#"INSERT INTO budgets
                   (id, user_id, category_id, amount, currency, start_date, end_date,
                    rollover_unused, alert_threshold)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
               RETURNING *"#,
        )
        .bind(id)
        .bind(user_id)
        .bind(category_id)
        .bind(amount)
        .bind(currency)
        .bind(start_date)
        .bind(end_date)
        .bind(rollover_unused)
        .bind(alert_threshold)
        .fetch_one(pool)
        .await
    }

    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Budget>, sqlx::Error> {
        sqlx::query_as::<_, Budget>("SELECT * FROM budgets WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Budgets for a user together with the category name, the expense sum
    /// over each budget's category and period, and the count of distinct
    /// days with spending. Period boundaries are day inclusive on both ends.
    pub async fn list_with_spend(pool: &PgPool, user_id: Uuid) -> Result<Vec<BudgetSpendRow>, sqlx::Error> {
        sqlx::query_as::<_, BudgetSpendRow>(
            r#"SELECT
                   b.id, b.user_id, b.category_id, b.amount, b.currency,
                   b.start_date, b.end_date, b.rollover_unused, b.alert_threshold,
                   b.created_at, b.updated_at,
                   c.name AS category_name,
                   COALESCE((
                       SELECT SUM(t.amount) FROM transactions t
                       WHERE t.user_id = b.user_id
                         AND t.category_id = b.category_id
                         AND t.kind = 'expense'
                         AND t.transaction_date >= b.start_date
                         AND t.transaction_date < b.end_date + INTERVAL '1 day'
                   ), 0) AS spent_amount,
                   (
                       SELECT COUNT(DISTINCT t.transaction_date::date) FROM transactions t
                       WHERE t.user_id = b.user_id
                         AND t.category_id = b.category_id
                         AND t.kind = 'expense'
                         AND t.transaction_date >= b.start_date
                         AND t.transaction_date < b.end_date + INTERVAL '1 day'
                   ) AS days_with_expenses
               FROM budgets b
               LEFT JOIN categories c ON b.category_id = c.id
               WHERE b.user_id = $1
               ORDER BY b.created_at DESC"#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        amount: Decimal,
        alert_threshold: Decimal,
    ) -> Result<Budget, sqlx::Error> {
        sqlx::query_as::<_, Budget>(
            r#"UPDATE budgets SET amount = $1, alert_threshold = $2, updated_at = NOW()
               WHERE id = $3 RETURNING *"#,
        )
        .bind(amount)
        .bind(alert_threshold)
        .bind(id)
        .fetch_one(pool)
        .await
    }
}
