use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Reference data, read-only through the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub kind: String,
}

#[derive(Debug, Deserialize)]
pub struct CategoryParams {
    pub kind: Option<String>,
}
