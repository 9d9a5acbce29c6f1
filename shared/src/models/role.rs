//! Role Model

use serde::{Deserialize, Serialize};

/// Reserved identifier of the Administrator role.
///
/// At most one active employee per branch may hold this role; the staff
/// mutation paths in hades-server enforce it.
pub const ADMINISTRATOR_ROLE_ID: i64 = 1;

/// Default role assigned when a new employee is created without an
/// explicit role (Vendor).
pub const DEFAULT_ROLE_ID: i64 = 2;

/// Role entity
///
/// Read-only reference data seeded by migration: Administrator, Vendor,
/// Cashier, Delivery, Warehouse, Supervisor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_system: bool,
}

impl Role {
    /// Whether this role is the distinguished Administrator role
    pub fn is_administrator(&self) -> bool {
        self.id == ADMINISTRATOR_ROLE_ID
    }
}
