use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{Duration, Utc};
use rand::Rng;
use uuid::Uuid;

use crate::auth::Claims;
use crate::db::{ResetCodeRepo, UserRepo};
use crate::errors::AppError;
use crate::models::{
    ForgotPasswordRequest, LoginRequest, RegisterRequest, RegisterResponse, ResetPasswordRequest,
    TokenResponse, UserInfo, UserProfile, VerifyResetCodeRequest,
};
use crate::handlers::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    if req.username.trim().is_empty() || req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::bad_request("username, email and password are required"));
    }

    if UserRepo::get_by_email(&state.pool, &req.email).await?.is_some() {
        return Err(AppError::bad_request("Email already registered"));
    }

    let password_hash = bcrypt::hash(&req.password, bcrypt::DEFAULT_COST)
        .map_err(|_| AppError::internal("Password hashing failed"))?;

    let user = UserRepo::create(
        &state.pool,
        &req.username,
        &req.email,
        &password_hash,
        &req.first_name,
        &req.last_name,
    )
    .await?;

    let token = state
        .jwt
        .generate_token(user.id, &user.email)
        .map_err(|_| AppError::internal("Token generation failed"))?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".into(),
            token,
            user_id: user.id,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let user = UserRepo::get_by_email(&state.pool, &req.email)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

    let valid = bcrypt::verify(&req.password, &user.password_hash)
        .map_err(|_| AppError::internal("Password verification failed"))?;

    if !valid {
        return Err(AppError::unauthorized("Invalid credentials"));
    }

    // Best effort; a failed timestamp update must not block the login.
    if let Err(err) = UserRepo::update_last_login(&state.pool, user.id).await {
        tracing::warn!("Failed to update last login for {}: {err}", user.id);
    }

    let token = state
        .jwt
        .generate_token(user.id, &user.email)
        .map_err(|_| AppError::internal("Token generation failed"))?;

    Ok(Json(TokenResponse {
        token,
        user: UserInfo {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        },
    }))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<UserProfile>, AppError> {
    if claims.sub != id {
        return Err(AppError::forbidden("Cannot access another user's profile"));
    }

    let user = UserRepo::get_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("User", &id.to_string()))?;

    Ok(Json(UserProfile::from(user)))
}

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    // The response is identical whether or not an account exists, so the
    // endpoint cannot be used to probe for registered emails.
    if let Some(user) = UserRepo::get_by_email(&state.pool, &req.email).await? {
        let code = format!("{:04}", rand::thread_rng().gen_range(0..10_000));
        let expires_at = Utc::now() + Duration::minutes(state.reset.code_ttl_minutes);

        ResetCodeRepo::upsert(&state.pool, &user.email, &code, expires_at).await?;
        deliver_reset_code(&user.email, &code);
    } else {
        tracing::debug!(email = %req.email, "Password reset requested for unknown email");
    }

    Ok(Json(serde_json::json!({
        "message": "Reset code sent"
    })))
}

pub async fn verify_reset_code(
    State(state): State<AppState>,
    Json(req): Json<VerifyResetCodeRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let valid = ResetCodeRepo::verify(&state.pool, &req.email, &req.code).await?;
    if !valid {
        return Err(AppError::bad_request("Invalid or expired reset code"));
    }

    Ok(Json(serde_json::json!({ "message": "Code verified" })))
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if req.new_password.is_empty() {
        return Err(AppError::bad_request("new_password is required"));
    }

    let consumed = ResetCodeRepo::consume(&state.pool, &req.email, &req.code).await?;
    if !consumed {
        return Err(AppError::bad_request("Invalid or expired reset code"));
    }

    let password_hash = bcrypt::hash(&req.new_password, bcrypt::DEFAULT_COST)
        .map_err(|_| AppError::internal("Password hashing failed"))?;
    UserRepo::update_password(&state.pool, &req.email, &password_hash).await?;

    Ok(Json(serde_json::json!({ "message": "Password reset successfully" })))
}

/// Mail delivery seam. SMTP is out of scope; the code is logged so operators
/// can relay it in development setups.
fn deliver_reset_code(email: &str, code: &str) {
    tracing::info!(email = %email, code = %code, "Password reset code issued");
}
