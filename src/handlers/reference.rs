use axum::{
    extract::{Query, State},
    Json,
};

use crate::db::{CategoryRepo, PaymentMethodRepo};
use crate::errors::AppError;
use crate::models::{Category, CategoryParams, PaymentMethod};
use crate::handlers::AppState;

pub async fn list_categories(
    State(state): State<AppState>,
    Query(params): Query<CategoryParams>,
) -> Result<Json<Vec<Category>>, AppError> {
    if let Some(kind) = params.kind.as_deref() {
        if kind != "income" && kind != "expense" {
            return Err(AppError::bad_request("kind must be 'income' or 'expense'"));
        }
    }

    let categories = CategoryRepo::list(&state.pool, params.kind.as_deref()).await?;
    Ok(Json(categories))
}

pub async fn list_payment_methods(
    State(state): State<AppState>,
) -> Result<Json<Vec<PaymentMethod>>, AppError> {
    let methods = PaymentMethodRepo::list_active(&state.pool).await?;
    Ok(Json(methods))
}
