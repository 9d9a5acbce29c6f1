//! Unit of Measure Model

use serde::{Deserialize, Serialize};

/// Unit of measure entity (e.g. "Unidad", "Kilogramo", "Litro")
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct UnitOfMeasure {
    pub id: i64,
    pub name: String,
    pub abbreviation: String,
}
