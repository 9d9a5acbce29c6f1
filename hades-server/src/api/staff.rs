//! Staff management API handlers
//!
//! Thin layer over [`crate::db::staff`]: resolve the request context,
//! run the mutation, shape the result. All administrator-rule decisions
//! live in the db layer's transactions.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::models::employee::{Employee, EmployeeCreate, EmployeeStatus, EmployeeUpdate};
use shared::models::{OpResult, Role};

use super::request_context;
use crate::auth::SessionIdentity;
use crate::db;
use crate::error::ServiceError;
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, ServiceError>;

pub async fn list_staff(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
) -> ApiResult<Vec<Employee>> {
    let ctx = request_context(&state, &identity).await?;
    let staff = db::staff::list_staff(&state.pool, ctx.branch_id).await?;
    Ok(Json(staff))
}

pub async fn create_staff(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
    Json(data): Json<EmployeeCreate>,
) -> ApiResult<OpResult> {
    let ctx = request_context(&state, &identity).await?;
    let (id, username) = db::staff::create_employee(
        &state.pool,
        &ctx,
        &data,
        &state.staff_default_password,
    )
    .await?;
    tracing::info!(
        employee_id = id,
        branch_id = ctx.branch_id,
        actor = ctx.acting_user_id,
        "Employee created"
    );
    Ok(Json(OpResult::created(id).with_message(format!(
        "Employee added successfully (username: {username})"
    ))))
}

pub async fn update_staff(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
    Path(id): Path<i64>,
    Json(data): Json<EmployeeUpdate>,
) -> ApiResult<OpResult> {
    let ctx = request_context(&state, &identity).await?;
    db::staff::update_employee(&state.pool, &ctx, id, &data).await?;
    Ok(Json(OpResult::ok().with_message("Employee updated successfully")))
}

pub async fn set_staff_status(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
    Path(id): Path<i64>,
    Json(status): Json<EmployeeStatus>,
) -> ApiResult<OpResult> {
    let ctx = request_context(&state, &identity).await?;
    db::staff::set_active_status(&state.pool, &ctx, id, status.is_active).await?;
    Ok(Json(OpResult::ok()))
}

pub async fn deactivate_staff(
    State(state): State<AppState>,
    Extension(identity): Extension<SessionIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<OpResult> {
    let ctx = request_context(&state, &identity).await?;
    let full_name = db::staff::deactivate_employee(&state.pool, &ctx, id).await?;
    tracing::info!(
        employee_id = id,
        branch_id = ctx.branch_id,
        actor = ctx.acting_user_id,
        "Employee deactivated"
    );
    Ok(Json(OpResult::ok().with_message(format!(
        "Employee {full_name} has been deactivated"
    ))))
}

pub async fn list_roles(State(state): State<AppState>) -> ApiResult<Vec<Role>> {
    let roles = db::roles::list_roles(&state.pool).await?;
    Ok(Json(roles))
}
