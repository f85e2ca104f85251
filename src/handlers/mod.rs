pub mod auth;
pub mod budgets;
pub mod goals;
pub mod health;
pub mod reference;
pub mod transactions;

use std::sync::Arc;

use crate::auth::jwt::JwtManager;
use crate::config::ResetConfig;

/// Shared application state available to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::PgPool,
    pub jwt: Arc<JwtManager>,
    pub reset: ResetConfig,
}
