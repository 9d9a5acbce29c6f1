//! Dashboard queries: headline counts and recent activity

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use crate::error::ServiceResult;

/// Headline numbers for the dashboard landing page
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_employees: i64,
    pub total_products: i64,
    /// Products below their minimum stock (or below 10 when no minimum is set)
    pub low_stock: i64,
    /// Stock on hand valued at average cost
    pub inventory_value: Decimal,
}

pub async fn stats(pool: &PgPool, branch_id: i64) -> ServiceResult<DashboardStats> {
    let (total_employees,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM employees WHERE branch_id = $1 AND is_active = TRUE",
    )
    .bind(branch_id)
    .fetch_one(pool)
    .await?;

    let (total_products,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM products WHERE is_active = TRUE")
            .fetch_one(pool)
            .await?;

    let (low_stock,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*)
         FROM inventory i
         JOIN products p ON i.product_id = p.id
         WHERE i.branch_id = $1 AND p.is_active = TRUE
           AND i.available_qty < CASE WHEN i.minimum_qty > 0 THEN i.minimum_qty ELSE 10 END",
    )
    .bind(branch_id)
    .fetch_one(pool)
    .await?;

    let (inventory_value,): (Decimal,) = sqlx::query_as(
        "SELECT COALESCE(SUM(i.available_qty * i.average_cost), 0)
         FROM inventory i
         JOIN products p ON i.product_id = p.id
         WHERE i.branch_id = $1 AND p.is_active = TRUE",
    )
    .bind(branch_id)
    .fetch_one(pool)
    .await?;

    Ok(DashboardStats {
        total_employees,
        total_products,
        low_stock,
        inventory_value,
    })
}

/// One recent-activity feed entry
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct ActivityEntry {
    pub kind: String,
    pub label: String,
    pub created_at: i64,
}

/// Most recently created employees and products, newest first
pub async fn recent_activity(pool: &PgPool, branch_id: i64) -> ServiceResult<Vec<ActivityEntry>> {
    let rows: Vec<ActivityEntry> = sqlx::query_as(
        "SELECT kind, label, created_at FROM (
            SELECT 'employee' AS kind, full_name AS label, created_at
            FROM employees WHERE branch_id = $1
            UNION ALL
            SELECT 'product' AS kind, name AS label, created_at
            FROM products
        ) activity
        ORDER BY created_at DESC
        LIMIT 10",
    )
    .bind(branch_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
