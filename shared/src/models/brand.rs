//! Brand Model

use serde::{Deserialize, Serialize};

/// Product brand entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Brand {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}
