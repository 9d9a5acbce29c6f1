//! Data models
//!
//! Shared between hades-server and the desktop frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64`.

pub mod branch;
pub mod brand;
pub mod category;
pub mod employee;
pub mod inventory;
pub mod op_result;
pub mod product;
pub mod role;
pub mod unit;

// Re-exports
pub use branch::*;
pub use brand::*;
pub use category::*;
pub use employee::*;
pub use inventory::*;
pub use op_result::*;
pub use product::*;
pub use role::*;
pub use unit::*;
