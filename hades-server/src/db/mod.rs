//! Database access layer
//!
//! Flat per-resource modules over a shared `PgPool`. Staff mutations that
//! touch the administrator rule run as single transactions with row locks;
//! see [`admin_guard`] and [`staff`].

pub mod admin_guard;
pub mod admin_users;
pub mod branches;
pub mod catalog;
pub mod dashboard;
pub mod inventory;
pub mod roles;
pub mod staff;

/// Explicit per-request operation context.
///
/// Replaces the ambient "current branch / current user" lookups of the
/// legacy desktop app: every mutation receives the branch it operates on
/// and the authenticated actor, resolved once by the API layer.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext {
    pub branch_id: i64,
    pub acting_user_id: i64,
}
