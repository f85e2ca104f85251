use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Json,
};
use std::sync::Arc;

use super::jwt::{Claims, JwtManager};
use crate::errors::ApiError;

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<JwtManager>,
}

/// Auth middleware: validates the JWT Bearer token from the Authorization
/// header and stores the claims in request extensions.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiError>)> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiError {
                code: "FORBIDDEN".into(),
                message: "No token provided".into(),
                details: None,
            }),
        ));
    };

    let claims: Claims = state.jwt.validate_token(token).map_err(|_| {
        (
            StatusCode::UNAUTHORIZED,
            Json(ApiError {
                code: "UNAUTHORIZED".into(),
                message: "Invalid or expired token".into(),
                details: None,
            }),
        )
    })?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
