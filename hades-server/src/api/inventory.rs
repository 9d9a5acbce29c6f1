//! Inventory API handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::models::{InventoryItem, InventoryUpsert};

use super::request_context;
use crate::auth::SessionIdentity;
use crate::db;
use crate::error::ServiceError;
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, ServiceError>;

pub async fn list_inventory(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
) -> ApiResult<Vec<InventoryItem>> {
    let ctx = request_context(&state, &identity).await?;
    let items = db::inventory::list_inventory(&state.pool, ctx.branch_id).await?;
    Ok(Json(items))
}

pub async fn upsert_inventory(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
    Path(product_id): Path<i64>,
    Json(data): Json<InventoryUpsert>,
) -> ApiResult<InventoryItem> {
    let ctx = request_context(&state, &identity).await?;
    let item = db::inventory::upsert_inventory(&state.pool, &ctx, product_id, &data).await?;
    Ok(Json(item))
}
