use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// Password-reset codes keyed by email with an explicit expiry, so the
/// reset flow survives restarts and works across server instances.
pub struct ResetCodeRepo;

impl ResetCodeRepo {
    pub async fn upsert(
        pool: &PgPool,
        email: &str,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"INSERT INTO password_reset_codes (email, code, expires_at)
               VALUES ($1, $2, $3)
               ON CONFLICT (email)
               DO UPDATE SET code = EXCLUDED.code, expires_at = EXCLUDED.expires_at, created_at = NOW()"#,
        )
        .bind(email)
        .bind(code)
        .bind(expires_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// True when a live, matching code exists for the email.
    pub async fn verify(pool: &PgPool, email: &str, code: &str) -> Result<bool, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as(
            r#"SELECT email FROM password_reset_codes
               WHERE email = $1 AND code = $2 AND expires_at > NOW()"#,
        )
        .bind(email)
        .bind(code)
        .fetch_optional(pool)
        .await?;
        Ok(row.is_some())
    }

    /// Verifies and deletes the code in one statement; codes are single use.
    pub async fn consume(pool: &PgPool, email: &str, code: &str) -> Result<bool, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as(
            r#"DELETE FROM password_reset_codes
               WHERE email = $1 AND code = $2 AND expires_at > NOW()
               RETURNING email"#,
        )
        .bind(email)
        .bind(code)
        .fetch_optional(pool)
        .await?;
        Ok(row.is_some())
    }
}
