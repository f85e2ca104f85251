use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{CreateTransactionRequest, CurrencyTotal, Transaction, TransactionKind, TransactionRecord};
use crate::progress::PeriodTotals;

pub struct TransactionRepo;

impl TransactionRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        kind: TransactionKind,
        amount: Decimal,
        req: &CreateTransactionRequest,
    ) -> Result<Transaction, sqlx::Error> {
        let id = Uuid::new_v4();
        sqlx::query_as::<_, Transaction>(
            r#"INSERT INTO transactions
                   (id, user_id, category_id, kind, amount, currency, payment_method_id,
                    transaction_date, description, is_recurring, recurrence_interval, receipt_url)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
               RETURNING *"#,
        )
        .bind(id)
        .bind(user_id)
        .bind(req.category_id)
        .bind(kind.as_str())
        .bind(amount)
        .bind(&req.currency)
        .bind(req.payment_method_id)
        .bind(req.transaction_date)
        .bind(&req.description)
        .bind(req.is_recurring)
        .bind(&req.recurrence_interval)
        .bind(&req.receipt_url)
        .fetch_one(pool)
        .await
    }

    pub async fn list(
        pool: &PgPool,
        user_id: Uuid,
        kind: TransactionKind,
    ) -> Result<Vec<TransactionRecord>, sqlx::Error> {
        sqlx::query_as::<_, TransactionRecord>(
            r#"SELECT
                   t.id, t.amount, t.currency, t.transaction_date, t.description,
                   t.is_recurring, t.recurrence_interval, t.receipt_url,
                   c.name AS category_name,
                   p.name AS payment_method_name
               FROM transactions t
               LEFT JOIN categories c ON t.category_id = c.id
               LEFT JOIN payment_methods p ON t.payment_method_id = p.id
               WHERE t.user_id = $1 AND t.kind = $2
               ORDER BY t.transaction_date DESC"#,
        )
        .bind(user_id)
        .bind(kind.as_str())
        .fetch_all(pool)
        .await
    }

    /// Income and expense sums over [start, end], optionally filtered by
    /// category. Both boundary days are inside the range; the end comparison
    /// runs to the end of the day, not midnight.
    pub async fn sum_over_period(
        pool: &PgPool,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        category_id: Option<Uuid>,
    ) -> Result<PeriodTotals, sqlx::Error> {
        sqlx::query_as::<_, PeriodTotals>(
            r#"SELECT
                   COALESCE(SUM(amount) FILTER (WHERE kind = 'income'), 0) AS total_income,
                   COALESCE(SUM(amount) FILTER (WHERE kind = 'expense'), 0) AS total_expense
               FROM transactions
               WHERE user_id = $1
                 AND transaction_date >= $2
                 AND transaction_date < $3::date + INTERVAL '1 day'
                 AND ($4::uuid IS NULL OR category_id = $4)"#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .bind(category_id)
        .fetch_one(pool)
        .await
    }

    pub async fn expense_totals_by_currency(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<CurrencyTotal>, sqlx::Error> {
        sqlx::query_as::<_, CurrencyTotal>(
            r#"SELECT currency, SUM(amount) AS total
               FROM transactions
               WHERE user_id = $1 AND kind = 'expense'
               GROUP BY currency
               ORDER BY currency"#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
