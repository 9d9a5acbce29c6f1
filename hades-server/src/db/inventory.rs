//! Inventory database operations

use shared::error::{AppError, ErrorCode};
use shared::models::{InventoryItem, InventoryUpsert};
use shared::util::now_millis;
use sqlx::PgPool;

use super::RequestContext;
use crate::error::ServiceResult;

pub async fn list_inventory(pool: &PgPool, branch_id: i64) -> ServiceResult<Vec<InventoryItem>> {
    let rows: Vec<InventoryItem> = sqlx::query_as(
        "SELECT branch_id, product_id, available_qty, minimum_qty,
                sale_price, average_cost, updated_at
         FROM inventory WHERE branch_id = $1 ORDER BY product_id",
    )
    .bind(branch_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Create or adjust the branch's inventory row for a product. Absent
/// fields keep their current value (zero on first insert).
pub async fn upsert_inventory(
    pool: &PgPool,
    ctx: &RequestContext,
    product_id: i64,
    data: &InventoryUpsert,
) -> ServiceResult<InventoryItem> {
    // The product must exist and be active before stocking it
    let product: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM products WHERE id = $1 AND is_active = TRUE")
            .bind(product_id)
            .fetch_optional(pool)
            .await?;
    if product.is_none() {
        return Err(AppError::new(ErrorCode::ProductNotFound).into());
    }

    let row: InventoryItem = sqlx::query_as(
        "INSERT INTO inventory (branch_id, product_id, available_qty, minimum_qty,
                                sale_price, average_cost, updated_at)
         VALUES ($1, $2, COALESCE($3, 0), COALESCE($4, 0), COALESCE($5, 0), COALESCE($6, 0), $7)
         ON CONFLICT (branch_id, product_id) DO UPDATE SET
            available_qty = COALESCE($3, inventory.available_qty),
            minimum_qty = COALESCE($4, inventory.minimum_qty),
            sale_price = COALESCE($5, inventory.sale_price),
            average_cost = COALESCE($6, inventory.average_cost),
            updated_at = $7
         RETURNING branch_id, product_id, available_qty, minimum_qty,
                   sale_price, average_cost, updated_at",
    )
    .bind(ctx.branch_id)
    .bind(product_id)
    .bind(data.available_qty)
    .bind(data.minimum_qty)
    .bind(data.sale_price)
    .bind(data.average_cost)
    .bind(now_millis())
    .fetch_one(pool)
    .await?;
    Ok(row)
}
