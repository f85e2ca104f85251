use sqlx::PgPool;

use crate::models::PaymentMethod;

pub struct PaymentMethodRepo;

impl PaymentMethodRepo {
    pub async fn list_active(pool: &PgPool) -> Result<Vec<PaymentMethod>, sqlx::Error> {
        sqlx::query_as::<_, PaymentMethod>(
            "SELECT * FROM payment_methods WHERE active = TRUE ORDER BY name",
        )
        .fetch_all(pool)
        .await
    }
}
