// src/handlers/auth.rs

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;
use validator::Validate;

use crate::{
    error::AppError,
    models::user::LoginRequest,
    state::AppState,
    utils::{
        hash::verify_password,
        jwt::{ADMIN_ROLE, sign_jwt},
    },
};

/// Authenticates the administrator and returns a JWT token.
///
/// Credentials are checked against the account configured at startup.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let admin = state
        .admin
        .as_ref()
        .ok_or(AppError::AuthError("Admin login is disabled".to_string()))?;

    if payload.username != admin.username
        || !verify_password(&payload.password, &admin.password_hash)?
    {
        tracing::warn!("Failed admin login for '{}'", payload.username);
        return Err(AppError::AuthError("Invalid username or password".to_string()));
    }

    let token = sign_jwt(
        &admin.username,
        ADMIN_ROLE,
        &state.config.jwt_secret,
        state.config.jwt_expiration,
    )?;

    Ok(Json(json!({
        "token": token,
        "type": "Bearer",
    })))
}
