//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub barcode: Option<String>,
    pub internal_code: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub brand_id: Option<i64>,
    pub unit_id: Option<i64>,
    /// Net weight in the product's unit of measure
    pub net_weight: Option<Decimal>,
    pub is_perishable: bool,
    /// Shelf life in days, only meaningful for perishables
    pub expiry_days: Option<i32>,
    pub is_active: bool,
    pub created_at: i64,
}

/// Product row joined with reference names and branch stock, as listed
/// in the back-office product grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProductWithStock {
    pub id: i64,
    pub barcode: Option<String>,
    pub internal_code: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub brand_id: Option<i64>,
    pub unit_id: Option<i64>,
    pub category_name: Option<String>,
    pub brand_name: Option<String>,
    pub unit_name: Option<String>,
    pub is_perishable: bool,
    pub is_active: bool,
    pub stock: Decimal,
    pub minimum_stock: Decimal,
    pub sale_price: Decimal,
    pub average_cost: Decimal,
    pub created_at: i64,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub barcode: Option<String>,
    pub internal_code: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub brand_id: Option<i64>,
    pub unit_id: Option<i64>,
    pub net_weight: Option<Decimal>,
    pub is_perishable: Option<bool>,
    pub expiry_days: Option<i32>,
    /// Initial branch inventory, created alongside the product
    pub sale_price: Option<Decimal>,
    pub minimum_stock: Option<Decimal>,
}

/// Update product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub barcode: Option<String>,
    pub internal_code: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub brand_id: Option<i64>,
    pub unit_id: Option<i64>,
    pub net_weight: Option<Decimal>,
    pub is_perishable: Option<bool>,
    pub expiry_days: Option<i32>,
}
