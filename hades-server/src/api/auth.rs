//! Authentication endpoint: the desktop login screen
//!
//! One endpoint serves both account populations, the way the legacy login
//! screen did: system administrator accounts are tried first, then branch
//! staff. Passwords are verified against argon2 hashes; plaintext
//! comparison does not exist in this system.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use shared::error::AppError;
use shared::models::Branch;

use crate::auth::{KIND_ADMIN, KIND_STAFF, create_token};
use crate::db;
use crate::error::{ServiceError, ServiceResult};
use crate::state::AppState;
use crate::util::verify_password;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// "admin" or "staff"
    pub kind: String,
    pub user_id: i64,
    pub full_name: String,
    /// Present for branch staff sessions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<Branch>,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ServiceResult<Json<LoginResponse>> {
    let username = req.username.trim();
    if username.is_empty() || req.password.is_empty() {
        return Err(AppError::invalid_credentials().into());
    }

    // System administrator accounts first
    if let Some(admin) = db::admin_users::find_by_username(&state.pool, username).await? {
        if !verify_password(&req.password, &admin.password_hash) {
            return Err(AppError::invalid_credentials().into());
        }
        db::admin_users::touch_last_access(&state.pool, admin.id).await?;
        let token = create_token(admin.id, None, KIND_ADMIN, &state.jwt_secret)
            .map_err(token_error)?;
        tracing::info!(user_id = admin.id, "System administrator logged in");
        return Ok(Json(LoginResponse {
            token,
            kind: KIND_ADMIN.to_string(),
            user_id: admin.id,
            full_name: admin.full_name,
            branch: None,
        }));
    }

    // Then branch staff (active employee of an active branch)
    let staff = db::staff::find_credential_by_username(&state.pool, username)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;
    if !verify_password(&req.password, &staff.password_hash) {
        return Err(AppError::invalid_credentials().into());
    }

    db::staff::touch_last_access(&state.pool, staff.id).await?;
    let branch = db::branches::get_branch(&state.pool, staff.branch_id).await?;
    let token = create_token(
        staff.id,
        Some(staff.branch_id),
        KIND_STAFF,
        &state.jwt_secret,
    )
    .map_err(token_error)?;
    tracing::info!(
        user_id = staff.id,
        username = %staff.username,
        branch_id = staff.branch_id,
        "Staff logged in"
    );

    Ok(Json(LoginResponse {
        token,
        kind: KIND_STAFF.to_string(),
        user_id: staff.id,
        full_name: staff.full_name,
        branch: Some(branch),
    }))
}

fn token_error(e: jsonwebtoken::errors::Error) -> ServiceError {
    tracing::error!("JWT creation failed: {e}");
    AppError::internal("Failed to create session token").into()
}
