use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::auth::Claims;
use crate::db::{BudgetRepo, TransactionRepo};
use crate::errors::AppError;
use crate::models::{
    Budget, BudgetSpendRow, BudgetView, CreateBudgetRequest, CreateBudgetResponse,
    UpdateBudgetRequest,
};
use crate::progress;
use crate::handlers::AppState;

pub async fn create(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateBudgetRequest>,
) -> Result<(StatusCode, Json<CreateBudgetResponse>), AppError> {
    let amount = Decimal::from_f64_retain(req.amount)
        .ok_or_else(|| AppError::bad_request("amount is not a valid number"))?;
    if amount <= Decimal::ZERO {
        return Err(AppError::bad_request("amount must be greater than zero"));
    }
    super::transactions::validate_currency(&req.currency)?;
    if req.end_date < req.start_date {
        return Err(AppError::bad_request("end_date must not precede start_date"));
    }
    let threshold = validate_threshold(req.alert_threshold)?;

    let budget = BudgetRepo::create(
        &state.pool,
        claims.sub,
        req.category_id,
        amount,
        &req.currency,
        req.start_date,
        req.end_date,
        req.rollover_unused,
        threshold,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateBudgetResponse {
            message: "Budget created successfully".into(),
            budget_id: budget.id,
        }),
    ))
}

pub async fn list(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<BudgetView>>, AppError> {
    if claims.sub != user_id {
        return Err(AppError::forbidden("Cannot access another user's budgets"));
    }

    let today = Utc::now().date_naive();
    let rows = BudgetRepo::list_with_spend(&state.pool, user_id).await?;
    let views = rows.into_iter().map(|row| into_view(row, today)).collect();
    Ok(Json(views))
}

pub async fn update(
    State(state): State<AppState>,
    Path(budget_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateBudgetRequest>,
) -> Result<Json<Budget>, AppError> {
    let existing = owned_budget(&state, budget_id, &claims).await?;

    let amount = match req.amount {
        Some(a) => {
            let a = Decimal::from_f64_retain(a)
                .ok_or_else(|| AppError::bad_request("amount is not a valid number"))?;
            if a <= Decimal::ZERO {
                return Err(AppError::bad_request("amount must be greater than zero"));
            }
            a
        }
        None => existing.amount,
    };
    let threshold = match req.alert_threshold {
        Some(t) => validate_threshold(t)?,
        None => existing.alert_threshold,
    };

    let budget = BudgetRepo::update(&state.pool, budget_id, amount, threshold).await?;
    Ok(Json(budget))
}

/// User-triggered rollover: once the period has ended with money left over,
/// seeds a budget of equal length for the next period with the remainder.
pub async fn rollover(
    State(state): State<AppState>,
    Path(budget_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<(StatusCode, Json<CreateBudgetResponse>), AppError> {
    let budget = owned_budget(&state, budget_id, &claims).await?;

    if !budget.rollover_unused {
        return Err(AppError::bad_request("Budget does not have rollover enabled"));
    }

    let today = Utc::now().date_naive();
    if today <= budget.end_date {
        return Err(AppError::bad_request("Budget period has not ended yet"));
    }

    let totals = TransactionRepo::sum_over_period(
        &state.pool,
        budget.user_id,
        budget.start_date,
        budget.end_date,
        Some(budget.category_id),
    )
    .await?;
    let remaining = budget.amount - totals.total_expense;
    if remaining <= Decimal::ZERO {
        return Err(AppError::bad_request("No unused amount to roll over"));
    }

    let period_days = (budget.end_date - budget.start_date).num_days() + 1;
    let next_start = budget.end_date + Duration::days(1);
    let next_end = budget.end_date + Duration::days(period_days);

    let next = BudgetRepo::create(
        &state.pool,
        budget.user_id,
        budget.category_id,
        remaining,
        &budget.currency,
        next_start,
        next_end,
        budget.rollover_unused,
        budget.alert_threshold,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateBudgetResponse {
            message: "Budget rolled over successfully".into(),
            budget_id: next.id,
        }),
    ))
}

async fn owned_budget(state: &AppState, budget_id: Uuid, claims: &Claims) -> Result<Budget, AppError> {
    let budget = BudgetRepo::get_by_id(&state.pool, budget_id)
        .await?
        .ok_or_else(|| AppError::not_found("Budget", &budget_id.to_string()))?;
    if budget.user_id != claims.sub {
        return Err(AppError::forbidden("Cannot access another user's budget"));
    }
    Ok(budget)
}

fn validate_threshold(threshold: f64) -> Result<Decimal, AppError> {
    let threshold = Decimal::from_f64_retain(threshold)
        .ok_or_else(|| AppError::bad_request("alert_threshold is not a valid number"))?;
    if threshold < Decimal::ZERO || threshold > Decimal::from(100) {
        return Err(AppError::bad_request("alert_threshold must be between 0 and 100"));
    }
    Ok(threshold)
}

fn into_view(row: BudgetSpendRow, today: chrono::NaiveDate) -> BudgetView {
    let metrics = progress::budget::evaluate(
        row.amount,
        row.alert_threshold,
        row.start_date,
        row.end_date,
        row.spent_amount,
        today,
    );
    let total_days = (row.end_date - row.start_date).num_days() + 1;

    BudgetView {
        id: row.id,
        user_id: row.user_id,
        category_id: row.category_id,
        category_name: row.category_name,
        amount: row.amount,
        currency: row.currency,
        start_date: row.start_date,
        end_date: row.end_date,
        rollover_unused: row.rollover_unused,
        alert_threshold: row.alert_threshold,
        created_at: row.created_at,
        updated_at: row.updated_at,
        spent_amount: row.spent_amount,
        remaining_amount: metrics.remaining_amount,
        progress_percentage: metrics.progress_percentage,
        days_remaining: metrics.days_remaining,
        days_with_expenses: row.days_with_expenses,
        total_days,
        daily_budget: metrics.daily_budget,
        is_over_budget: metrics.is_over_budget,
        needs_alert: metrics.needs_alert,
        state: metrics.state,
    }
}
