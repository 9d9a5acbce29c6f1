//! Catalog API handlers: products and reference data

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::models::{
    Brand, Category, OpResult, ProductCreate, ProductUpdate, ProductWithStock, UnitOfMeasure,
};

use super::request_context;
use crate::auth::SessionIdentity;
use crate::db;
use crate::error::ServiceError;
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, ServiceError>;

pub async fn list_products(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
) -> ApiResult<Vec<ProductWithStock>> {
    let ctx = request_context(&state, &identity).await?;
    let products = db::catalog::list_products(&state.pool, ctx.branch_id).await?;
    Ok(Json(products))
}

pub async fn create_product(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
    Json(data): Json<ProductCreate>,
) -> ApiResult<OpResult> {
    let ctx = request_context(&state, &identity).await?;
    let id = db::catalog::create_product(&state.pool, &ctx, &data).await?;
    Ok(Json(
        OpResult::created(id).with_message("Product added successfully"),
    ))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(data): Json<ProductUpdate>,
) -> ApiResult<OpResult> {
    db::catalog::update_product(&state.pool, id, &data).await?;
    Ok(Json(OpResult::ok().with_message("Product updated successfully")))
}

pub async fn set_product_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(status): Json<ProductStatus>,
) -> ApiResult<OpResult> {
    db::catalog::set_product_status(&state.pool, id, status.is_active).await?;
    Ok(Json(OpResult::ok()))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<OpResult> {
    db::catalog::delete_product(&state.pool, id).await?;
    Ok(Json(OpResult::ok().with_message("Product removed successfully")))
}

#[derive(serde::Deserialize)]
pub struct ProductStatus {
    pub is_active: bool,
}

pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Vec<Category>> {
    Ok(Json(db::catalog::list_categories(&state.pool).await?))
}

pub async fn list_brands(State(state): State<AppState>) -> ApiResult<Vec<Brand>> {
    Ok(Json(db::catalog::list_brands(&state.pool).await?))
}

pub async fn list_units(State(state): State<AppState>) -> ApiResult<Vec<UnitOfMeasure>> {
    Ok(Json(db::catalog::list_units(&state.pool).await?))
}
