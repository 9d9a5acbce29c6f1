//! Branch database operations

use shared::error::{AppError, ErrorCode};
use shared::models::Branch;
use sqlx::PgPool;

use crate::error::ServiceResult;

pub async fn list_active(pool: &PgPool) -> ServiceResult<Vec<Branch>> {
    let rows: Vec<Branch> = sqlx::query_as(
        "SELECT id, code, trade_name, is_active, created_at
         FROM branches WHERE is_active = TRUE ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn get_branch(pool: &PgPool, id: i64) -> ServiceResult<Branch> {
    let row: Option<Branch> = sqlx::query_as(
        "SELECT id, code, trade_name, is_active, created_at FROM branches WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    row.ok_or_else(|| AppError::new(ErrorCode::BranchNotFound).into())
}

/// Resolve the branch a request operates on: the caller's own branch when
/// authenticated as branch staff, otherwise the first available branch
/// (single-branch deployments).
pub async fn resolve_branch(pool: &PgPool, preferred: Option<i64>) -> ServiceResult<i64> {
    if let Some(id) = preferred {
        let row: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM branches WHERE id = $1 AND is_active = TRUE")
                .bind(id)
                .fetch_optional(pool)
                .await?;
        return row
            .map(|(id,)| id)
            .ok_or_else(|| AppError::new(ErrorCode::BranchNotFound).into());
    }

    let row: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM branches WHERE is_active = TRUE ORDER BY id LIMIT 1")
            .fetch_optional(pool)
            .await?;
    row.map(|(id,)| id)
        .ok_or_else(|| AppError::new(ErrorCode::NoBranchAvailable).into())
}
