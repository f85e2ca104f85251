use axum::{extract::State, http::StatusCode, Extension, Json};
use rust_decimal::Decimal;

use crate::auth::Claims;
use crate::db::TransactionRepo;
use crate::errors::AppError;
use crate::models::{
    CreateTransactionRequest, CreateTransactionResponse, CurrencyTotal, TransactionKind,
    TransactionRecord,
};
use crate::handlers::AppState;

pub async fn list_income(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<TransactionRecord>>, AppError> {
    let records = TransactionRepo::list(&state.pool, claims.sub, TransactionKind::Income).await?;
    Ok(Json(records))
}

pub async fn list_expense(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<TransactionRecord>>, AppError> {
    let records = TransactionRepo::list(&state.pool, claims.sub, TransactionKind::Expense).await?;
    Ok(Json(records))
}

pub async fn create_income(
    state: State<AppState>,
    claims: Extension<Claims>,
    req: Json<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<CreateTransactionResponse>), AppError> {
    create(state, claims, TransactionKind::Income, req).await
}

pub async fn create_expense(
    state: State<AppState>,
    claims: Extension<Claims>,
    req: Json<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<CreateTransactionResponse>), AppError> {
    create(state, claims, TransactionKind::Expense, req).await
}

async fn create(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    kind: TransactionKind,
    Json(req): Json<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<CreateTransactionResponse>), AppError> {
    let amount = validate_amount(req.amount)?;
    validate_currency(&req.currency)?;

    let tx = TransactionRepo::create(&state.pool, claims.sub, kind, amount, &req).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateTransactionResponse {
            message: format!("{} added successfully", capitalize(kind.as_str())),
            id: tx.id,
        }),
    ))
}

pub async fn expense_total(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<CurrencyTotal>>, AppError> {
    let totals = TransactionRepo::expense_totals_by_currency(&state.pool, claims.sub).await?;
    Ok(Json(totals))
}

fn validate_amount(amount: f64) -> Result<Decimal, AppError> {
    let amount = Decimal::from_f64_retain(amount)
        .ok_or_else(|| AppError::bad_request("amount is not a valid number"))?;
    if amount < Decimal::ZERO {
        return Err(AppError::bad_request("amount must be non-negative"));
    }
    Ok(amount)
}

pub(super) fn validate_currency(currency: &str) -> Result<(), AppError> {
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::bad_request("currency must be a 3-letter code"));
    }
    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
