use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::auth::Claims;
use crate::db::{GoalRepo, TransactionRepo};
use crate::errors::AppError;
use crate::models::{
    CreateGoalRequest, CreateGoalResponse, GoalView, PeriodDetails, SavingsGoal, UpdateGoalRequest,
};
use crate::progress;
use crate::handlers::AppState;

pub async fn create(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateGoalRequest>,
) -> Result<(StatusCode, Json<CreateGoalResponse>), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::bad_request("name is required"));
    }
    let target_amount = Decimal::from_f64_retain(req.target_amount)
        .ok_or_else(|| AppError::bad_request("target_amount is not a valid number"))?;
    if target_amount <= Decimal::ZERO {
        return Err(AppError::bad_request("target_amount must be greater than zero"));
    }
    super::transactions::validate_currency(&req.currency)?;
    if req.target_date < req.start_date {
        return Err(AppError::bad_request("target_date must not precede start_date"));
    }

    let goal = GoalRepo::create(
        &state.pool,
        claims.sub,
        &req.name,
        target_amount,
        &req.currency,
        req.start_date,
        req.target_date,
        &req.priority,
        &req.description,
    )
    .await?;

    let totals = TransactionRepo::sum_over_period(
        &state.pool,
        claims.sub,
        goal.start_date,
        goal.target_date,
        None,
    )
    .await?;
    let computed = progress::savings::compute(goal.target_amount, &totals);

    Ok((
        StatusCode::CREATED,
        Json(CreateGoalResponse {
            message: "Savings goal created successfully".into(),
            goal_id: goal.id,
            actual_savings: computed.actual_savings,
            total_income: totals.total_income,
            total_expense: totals.total_expense,
            progress_percentage: computed.progress_percentage,
        }),
    ))
}

pub async fn list(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<GoalView>>, AppError> {
    if claims.sub != user_id {
        return Err(AppError::forbidden("Cannot access another user's goals"));
    }

    let goals = GoalRepo::list(&state.pool, user_id).await?;
    let today = Utc::now().date_naive();

    let mut views = Vec::with_capacity(goals.len());
    for goal in goals {
        views.push(into_view(&state, goal, today).await?);
    }
    Ok(Json(views))
}

pub async fn update(
    State(state): State<AppState>,
    Path(goal_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateGoalRequest>,
) -> Result<Json<GoalView>, AppError> {
    let existing = owned_goal(&state, goal_id, &claims).await?;

    let name = req.name.as_deref().unwrap_or(&existing.name);
    if name.trim().is_empty() {
        return Err(AppError::bad_request("name is required"));
    }
    let target_amount = match req.target_amount {
        Some(t) => {
            let t = Decimal::from_f64_retain(t)
                .ok_or_else(|| AppError::bad_request("target_amount is not a valid number"))?;
            if t <= Decimal::ZERO {
                return Err(AppError::bad_request("target_amount must be greater than zero"));
            }
            t
        }
        None => existing.target_amount,
    };
    let target_date = req.target_date.unwrap_or(existing.target_date);
    if target_date < existing.start_date {
        return Err(AppError::bad_request("target_date must not precede start_date"));
    }
    let priority = req.priority.as_deref().unwrap_or(&existing.priority);
    let description = req.description.as_deref().unwrap_or(&existing.description);

    let goal = GoalRepo::update(
        &state.pool,
        goal_id,
        name,
        target_amount,
        target_date,
        priority,
        description,
    )
    .await?;

    let today = Utc::now().date_naive();
    Ok(Json(into_view(&state, goal, today).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(goal_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<serde_json::Value>, AppError> {
    owned_goal(&state, goal_id, &claims).await?;
    GoalRepo::delete(&state.pool, goal_id).await?;
    Ok(Json(serde_json::json!({ "message": "Goal deleted" })))
}

async fn owned_goal(state: &AppState, goal_id: Uuid, claims: &Claims) -> Result<SavingsGoal, AppError> {
    let goal = GoalRepo::get_by_id(&state.pool, goal_id)
        .await?
        .ok_or_else(|| AppError::not_found("Goal", &goal_id.to_string()))?;
    if goal.user_id != claims.sub {
        return Err(AppError::forbidden("Cannot access another user's goal"));
    }
    Ok(goal)
}

async fn into_view(
    state: &AppState,
    goal: SavingsGoal,
    today: chrono::NaiveDate,
) -> Result<GoalView, AppError> {
    let totals = TransactionRepo::sum_over_period(
        &state.pool,
        goal.user_id,
        goal.start_date,
        goal.target_date,
        None,
    )
    .await?;
    let computed = progress::savings::compute(goal.target_amount, &totals);
    let state_now = progress::savings::classify(today, goal.target_date, computed.status);

    Ok(GoalView {
        id: goal.id,
        user_id: goal.user_id,
        name: goal.name,
        target_amount: goal.target_amount,
        current_amount: computed.actual_savings,
        currency: goal.currency,
        start_date: goal.start_date,
        target_date: goal.target_date,
        priority: goal.priority,
        description: goal.description,
        status: computed.status,
        state: state_now,
        progress_percentage: computed.progress_percentage,
        remaining_amount: computed.remaining_amount,
        period_details: PeriodDetails {
            total_income: totals.total_income,
            total_expense: totals.total_expense,
            actual_savings: computed.actual_savings,
        },
        created_at: goal.created_at,
        updated_at: goal.updated_at,
    })
}
