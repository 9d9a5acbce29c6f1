//! Session authentication for the back-office API
//!
//! Two account populations share the login endpoint: system administrators
//! (the desktop login screen's admin accounts) and branch staff. The JWT
//! carries which population the session belongs to and, for staff, the
//! branch it is bound to.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// JWT claims for back-office sessions
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User ID (admin_users.id or employees.id)
    pub sub: String,
    /// Branch the session is bound to (branch staff only)
    pub branch_id: Option<i64>,
    /// Session kind: "admin" or "staff"
    pub kind: String,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated identity extracted from the JWT
#[derive(Debug, Clone)]
pub struct SessionIdentity {
    pub user_id: i64,
    /// `None` for system administrators, who are not bound to one branch
    pub branch_id: Option<i64>,
    pub is_system_admin: bool,
}

const JWT_EXPIRY_HOURS: i64 = 12;

pub const KIND_ADMIN: &str = "admin";
pub const KIND_STAFF: &str = "staff";

/// Create a session JWT
pub fn create_token(
    user_id: i64,
    branch_id: Option<i64>,
    kind: &str,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = SessionClaims {
        sub: user_id.to_string(),
        branch_id,
        kind: kind.to_string(),
        exp: (now + chrono::Duration::hours(JWT_EXPIRY_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Middleware that extracts and verifies the session JWT from the
/// Authorization header
pub async fn session_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| error_response(401, "Missing Authorization header"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| error_response(401, "Invalid Authorization format"))?;

    let validation = Validation::default();
    let token_data = jsonwebtoken::decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        error_response(401, "Invalid or expired token")
    })?;

    let user_id = token_data
        .claims
        .sub
        .parse::<i64>()
        .map_err(|_| error_response(401, "Invalid token subject"))?;

    let identity = SessionIdentity {
        user_id,
        branch_id: token_data.claims.branch_id,
        is_system_admin: token_data.claims.kind == KIND_ADMIN,
    };

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

fn error_response(status: u16, message: &str) -> Response {
    let body = serde_json::json!({ "error": message });
    let status =
        http::StatusCode::from_u16(status).unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR);
    (status, axum::Json(body)).into_response()
}
