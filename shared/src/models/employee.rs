//! Employee Model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Employee entity (without password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    /// Branch reference
    pub branch_id: i64,
    pub username: String,
    pub full_name: String,
    pub national_id: Option<String>,
    /// Role reference; role id 1 is the Administrator role
    pub role_id: i64,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub salary: Decimal,
    pub hire_date: NaiveDate,
    pub is_active: bool,
    /// Owners cannot be deactivated through the staff API
    pub is_owner: bool,
    pub last_access: Option<i64>,
    pub created_at: i64,
}

/// Create employee payload
///
/// `full_name` is the only hard-required field; the role defaults to
/// Vendor and the hire date to today.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub full_name: String,
    pub national_id: Option<String>,
    /// Role reference (defaults to the Vendor role)
    pub role_id: Option<i64>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    /// Defaults to zero
    pub salary: Option<Decimal>,
    /// Defaults to the current date
    pub hire_date: Option<NaiveDate>,
}

/// Update employee payload
///
/// Unlike create, the update path requires full name, national ID and
/// role to be supplied together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    pub full_name: String,
    pub national_id: String,
    pub role_id: i64,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub salary: Option<Decimal>,
    pub hire_date: Option<NaiveDate>,
}

/// Toggle active status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeStatus {
    pub is_active: bool,
}
