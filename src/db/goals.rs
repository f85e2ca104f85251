use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::SavingsGoal;

pub struct GoalRepo;

impl GoalRepo {
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        name: &str,
        target_amount: Decimal,
        currency: &str,
        start_date: NaiveDate,
        target_date: NaiveDate,
        priority: &str,
        description: &str,
    ) -> Result<SavingsGoal, sqlx::Error> {
        let id = Uuid::new_v4();
        sqlx::query_as::<_, SavingsGoal>(
            r#"INSERT INTO savings_goals
                   (id, user_id, name, target_amount, currency, start_date, target_date,
                    priority, description)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
               RETURNING *"#,
        )
        .bind(id)
        .bind(user_id)
        .bind(name)
        .bind(target_amount)
        .bind(currency)
        .bind(start_date)
        .bind(target_date)
        .bind(priority)
        .bind(description)
        .fetch_one(pool)
        .await
    }

    pub async fn list(pool: &PgPool, user_id: Uuid) -> Result<Vec<SavingsGoal>, sqlx::Error> {
        sqlx::query_as::<_, SavingsGoal>(
            "SELECT * FROM savings_goals WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Option<SavingsGoal>, sqlx::Error> {
        sqlx::query_as::<_, SavingsGoal>("SELECT * FROM savings_goals WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        name: &str,
        target_amount: Decimal,
        target_date: NaiveDate,
        priority: &str,
        description: &str,
    ) -> Result<SavingsGoal, sqlx::Error> {
        sqlx::query_as::<_, SavingsGoal>(
            r#"UPDATE savings_goals
               SET name = $1, target_amount = $2, target_date = $3, priority = $4,
                   description = $5, updated_at = NOW()
               WHERE id = $6 RETURNING *"#,
        )
        .bind(name)
        .bind(target_amount)
        .bind(target_date)
        .bind(priority)
        .bind(description)
        .bind(id)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM savings_goals WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
