//! Catalog database operations: products and their reference data
//!
//! Products carry no cross-row invariant; writes are single statements,
//! except create/delete which pair the product row with its branch
//! inventory row in one transaction.

use shared::error::{AppError, ErrorCode};
use shared::models::{
    Brand, Category, ProductCreate, ProductUpdate, ProductWithStock, UnitOfMeasure,
};
use shared::util::{now_millis, snowflake_id};
use sqlx::PgPool;

use super::RequestContext;
use crate::error::ServiceResult;

/// Product grid for the back-office: reference names and the branch's
/// stock joined in, active products only.
pub async fn list_products(pool: &PgPool, branch_id: i64) -> ServiceResult<Vec<ProductWithStock>> {
    let rows: Vec<ProductWithStock> = sqlx::query_as(
        "SELECT
            p.id, p.barcode, p.internal_code, p.name, p.description,
            p.category_id, p.brand_id, p.unit_id,
            c.name AS category_name,
            b.name AS brand_name,
            u.name AS unit_name,
            p.is_perishable, p.is_active,
            COALESCE(i.available_qty, 0) AS stock,
            COALESCE(i.minimum_qty, 0) AS minimum_stock,
            COALESCE(i.sale_price, 0) AS sale_price,
            COALESCE(i.average_cost, 0) AS average_cost,
            p.created_at
        FROM products p
        LEFT JOIN categories c ON p.category_id = c.id
        LEFT JOIN brands b ON p.brand_id = b.id
        LEFT JOIN units_of_measure u ON p.unit_id = u.id
        LEFT JOIN inventory i ON p.id = i.product_id AND i.branch_id = $1
        WHERE p.is_active = TRUE
        ORDER BY p.name ASC",
    )
    .bind(branch_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Create a product, and its branch inventory row when pricing or stock
/// thresholds were supplied, in one transaction.
pub async fn create_product(
    pool: &PgPool,
    ctx: &RequestContext,
    data: &ProductCreate,
) -> ServiceResult<i64> {
    let name = data.name.trim();
    if name.is_empty() {
        return Err(
            AppError::with_message(ErrorCode::RequiredField, "Product name is required").into(),
        );
    }

    let mut tx = pool.begin().await?;

    if let Some(barcode) = data.barcode.as_deref().filter(|s| !s.is_empty()) {
        let taken: Option<(i64,)> = sqlx::query_as("SELECT id FROM products WHERE barcode = $1")
            .bind(barcode)
            .fetch_optional(&mut *tx)
            .await?;
        if taken.is_some() {
            return Err(AppError::new(ErrorCode::ProductBarcodeExists).into());
        }
    }
    if let Some(code) = data.internal_code.as_deref().filter(|s| !s.is_empty()) {
        let taken: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM products WHERE internal_code = $1")
                .bind(code)
                .fetch_optional(&mut *tx)
                .await?;
        if taken.is_some() {
            return Err(AppError::new(ErrorCode::ProductCodeExists).into());
        }
    }

    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO products (
            id, barcode, internal_code, name, description, category_id, brand_id,
            unit_id, net_weight, is_perishable, expiry_days, is_active, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, TRUE, $12)",
    )
    .bind(id)
    .bind(&data.barcode)
    .bind(&data.internal_code)
    .bind(name)
    .bind(&data.description)
    .bind(data.category_id)
    .bind(data.brand_id)
    .bind(data.unit_id)
    .bind(data.net_weight)
    .bind(data.is_perishable.unwrap_or(false))
    .bind(data.expiry_days)
    .bind(now_millis())
    .execute(&mut *tx)
    .await?;

    if data.sale_price.is_some() || data.minimum_stock.is_some() {
        sqlx::query(
            "INSERT INTO inventory (branch_id, product_id, available_qty, minimum_qty,
                                    sale_price, average_cost, updated_at)
             VALUES ($1, $2, 0, $3, $4, 0, $5)",
        )
        .bind(ctx.branch_id)
        .bind(id)
        .bind(data.minimum_stock.unwrap_or_default())
        .bind(data.sale_price.unwrap_or_default())
        .bind(now_millis())
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(id)
}

pub async fn update_product(pool: &PgPool, id: i64, data: &ProductUpdate) -> ServiceResult<()> {
    let result = sqlx::query(
        "UPDATE products SET
            name = COALESCE($1, name),
            barcode = COALESCE($2, barcode),
            internal_code = COALESCE($3, internal_code),
            description = COALESCE($4, description),
            category_id = COALESCE($5, category_id),
            brand_id = COALESCE($6, brand_id),
            unit_id = COALESCE($7, unit_id),
            net_weight = COALESCE($8, net_weight),
            is_perishable = COALESCE($9, is_perishable),
            expiry_days = COALESCE($10, expiry_days)
        WHERE id = $11",
    )
    .bind(&data.name)
    .bind(&data.barcode)
    .bind(&data.internal_code)
    .bind(&data.description)
    .bind(data.category_id)
    .bind(data.brand_id)
    .bind(data.unit_id)
    .bind(data.net_weight)
    .bind(data.is_perishable)
    .bind(data.expiry_days)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::new(ErrorCode::ProductNotFound).into());
    }
    Ok(())
}

pub async fn set_product_status(pool: &PgPool, id: i64, active: bool) -> ServiceResult<()> {
    let result = sqlx::query("UPDATE products SET is_active = $1 WHERE id = $2")
        .bind(active)
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::new(ErrorCode::ProductNotFound).into());
    }
    Ok(())
}

/// Remove a product and its inventory rows in one transaction
pub async fn delete_product(pool: &PgPool, id: i64) -> ServiceResult<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM inventory WHERE product_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::new(ErrorCode::ProductNotFound).into());
    }

    tx.commit().await?;
    Ok(())
}

// ── Reference data ──

pub async fn list_categories(pool: &PgPool) -> ServiceResult<Vec<Category>> {
    let rows: Vec<Category> = sqlx::query_as(
        "SELECT id, name, description, is_active
         FROM categories WHERE is_active = TRUE ORDER BY name ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn list_brands(pool: &PgPool) -> ServiceResult<Vec<Brand>> {
    let rows: Vec<Brand> = sqlx::query_as(
        "SELECT id, name, description, is_active
         FROM brands WHERE is_active = TRUE ORDER BY name ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn list_units(pool: &PgPool) -> ServiceResult<Vec<UnitOfMeasure>> {
    let rows: Vec<UnitOfMeasure> =
        sqlx::query_as("SELECT id, name, abbreviation FROM units_of_measure ORDER BY name ASC")
            .fetch_all(pool)
            .await?;
    Ok(rows)
}
