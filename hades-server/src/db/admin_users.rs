//! System administrator accounts (login screen, `a_users` in the legacy schema)
//!
//! Distinct from branch staff: these accounts manage the whole system and
//! are not subject to the branch administrator rule.

use shared::util::now_millis;
use sqlx::PgPool;

use crate::error::ServiceResult;
use crate::util::hash_password;

#[derive(Debug, sqlx::FromRow)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub email: Option<String>,
    pub is_active: bool,
    pub last_access: Option<i64>,
    pub created_at: i64,
}

pub async fn find_by_username(pool: &PgPool, username: &str) -> ServiceResult<Option<AdminUser>> {
    let row = sqlx::query_as(
        "SELECT id, username, password_hash, full_name, email, is_active, last_access, created_at
         FROM admin_users WHERE username = $1 AND is_active = TRUE",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn get_by_id(pool: &PgPool, id: i64) -> ServiceResult<Option<AdminUser>> {
    let row = sqlx::query_as(
        "SELECT id, username, password_hash, full_name, email, is_active, last_access, created_at
         FROM admin_users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn touch_last_access(pool: &PgPool, id: i64) -> ServiceResult<()> {
    sqlx::query("UPDATE admin_users SET last_access = $1 WHERE id = $2")
        .bind(now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Create the bootstrap system administrator account if it does not exist
pub async fn ensure_default_admin(
    pool: &PgPool,
    username: &str,
    password: &str,
) -> ServiceResult<()> {
    let existing: Option<(i64,)> = sqlx::query_as("SELECT id FROM admin_users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    let password_hash = hash_password(password).map_err(|e| {
        shared::error::AppError::internal(format!("Failed to hash password: {e}"))
    })?;

    sqlx::query(
        "INSERT INTO admin_users (id, username, password_hash, full_name, is_active, created_at)
         VALUES ($1, $2, $3, $4, TRUE, $5)
         ON CONFLICT (username) DO NOTHING",
    )
    .bind(shared::util::snowflake_id())
    .bind(username)
    .bind(&password_hash)
    .bind("System Administrator")
    .bind(now_millis())
    .execute(pool)
    .await?;

    tracing::info!(username, "Created bootstrap system administrator");
    Ok(())
}
