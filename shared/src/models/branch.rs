//! Branch Model ("local" in the legacy schema)

use serde::{Deserialize, Serialize};

/// Branch entity — a business location scoping employees and inventory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Branch {
    pub id: i64,
    /// Short branch code (e.g. "MAIN")
    pub code: String,
    pub trade_name: String,
    pub is_active: bool,
    pub created_at: i64,
}
