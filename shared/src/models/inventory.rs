//! Inventory Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Inventory row for one (branch, product) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct InventoryItem {
    pub branch_id: i64,
    pub product_id: i64,
    pub available_qty: Decimal,
    pub minimum_qty: Decimal,
    pub sale_price: Decimal,
    pub average_cost: Decimal,
    pub updated_at: i64,
}

/// Upsert payload for a branch inventory row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryUpsert {
    pub available_qty: Option<Decimal>,
    pub minimum_qty: Option<Decimal>,
    pub sale_price: Option<Decimal>,
    pub average_cost: Option<Decimal>,
}
