//! Shared types for the HADES back-office
//!
//! Common types used across crates: domain models, the unified error
//! system, and small utilities (timestamps, ID generation).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};
