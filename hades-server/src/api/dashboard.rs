//! Dashboard API handlers

use axum::{Extension, Json, extract::State};

use super::request_context;
use crate::auth::SessionIdentity;
use crate::db;
use crate::db::dashboard::{ActivityEntry, DashboardStats};
use crate::error::ServiceError;
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, ServiceError>;

pub async fn stats(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
) -> ApiResult<DashboardStats> {
    let ctx = request_context(&state, &identity).await?;
    Ok(Json(db::dashboard::stats(&state.pool, ctx.branch_id).await?))
}

pub async fn recent_activity(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
) -> ApiResult<Vec<ActivityEntry>> {
    let ctx = request_context(&state, &identity).await?;
    Ok(Json(
        db::dashboard::recent_activity(&state.pool, ctx.branch_id).await?,
    ))
}
