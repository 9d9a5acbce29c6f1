//! Role database operations (read-only reference data)

use shared::models::Role;
use sqlx::PgPool;

use crate::error::ServiceResult;

pub async fn list_roles(pool: &PgPool) -> ServiceResult<Vec<Role>> {
    let rows: Vec<Role> =
        sqlx::query_as("SELECT id, name, description, is_system FROM roles ORDER BY id")
            .fetch_all(pool)
            .await?;
    Ok(rows)
}
