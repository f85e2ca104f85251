use sqlx::PgPool;

use crate::models::Category;

pub struct CategoryRepo;

impl CategoryRepo {
    pub async fn list(pool: &PgPool, kind: Option<&str>) -> Result<Vec<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE ($1::text IS NULL OR kind = $1) ORDER BY name",
        )
        .bind(kind)
        .fetch_all(pool)
        .await
    }
}
