//! Profile endpoint: the authenticated user's own record

use axum::{Extension, Json, extract::State};
use shared::error::AppError;

use super::request_context;
use crate::auth::SessionIdentity;
use crate::db;
use crate::error::ServiceError;
use crate::state::AppState;

/// GET /api/profile
pub async fn profile(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    if identity.is_system_admin {
        let admin = db::admin_users::get_by_id(&state.pool, identity.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;
        return Ok(Json(serde_json::json!({
            "kind": "admin",
            "user_id": admin.id,
            "username": admin.username,
            "full_name": admin.full_name,
            "email": admin.email,
            "last_access": admin.last_access,
        })));
    }

    let ctx = request_context(&state, &identity).await?;
    let employee = db::staff::get_employee(&state.pool, ctx.branch_id, identity.user_id).await?;
    Ok(Json(serde_json::json!({
        "kind": "staff",
        "user": employee,
    })))
}
