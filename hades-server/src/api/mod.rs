//! API routes for hades-server

pub mod auth;
pub mod catalog;
pub mod dashboard;
pub mod health;
pub mod inventory;
pub mod profile;
pub mod staff;

use axum::routing::{get, patch, post, put};
use axum::{Router, middleware};
use tower_http::trace::TraceLayer;

use crate::auth::{SessionIdentity, session_auth_middleware};
use crate::db::{self, RequestContext};
use crate::error::ServiceResult;
use crate::state::AppState;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Back-office API (JWT authenticated)
    let protected = Router::new()
        .route("/api/staff", get(staff::list_staff).post(staff::create_staff))
        .route(
            "/api/staff/{id}",
            put(staff::update_staff).delete(staff::deactivate_staff),
        )
        .route("/api/staff/{id}/status", patch(staff::set_staff_status))
        .route("/api/roles", get(staff::list_roles))
        .route(
            "/api/products",
            get(catalog::list_products).post(catalog::create_product),
        )
        .route(
            "/api/products/{id}",
            put(catalog::update_product).delete(catalog::delete_product),
        )
        .route("/api/products/{id}/status", patch(catalog::set_product_status))
        .route("/api/categories", get(catalog::list_categories))
        .route("/api/brands", get(catalog::list_brands))
        .route("/api/units", get(catalog::list_units))
        .route("/api/inventory", get(inventory::list_inventory))
        .route("/api/inventory/{product_id}", put(inventory::upsert_inventory))
        .route("/api/dashboard/stats", get(dashboard::stats))
        .route("/api/dashboard/activity", get(dashboard::recent_activity))
        .route("/api/profile", get(profile::profile))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/auth/login", post(auth::login))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the explicit operation context for a request: the caller's own
/// branch for branch staff, the first available branch for system
/// administrators (single-branch deployments).
pub(crate) async fn request_context(
    state: &AppState,
    identity: &SessionIdentity,
) -> ServiceResult<RequestContext> {
    let branch_id = db::branches::resolve_branch(&state.pool, identity.branch_id).await?;
    Ok(RequestContext {
        branch_id,
        acting_user_id: identity.user_id,
    })
}
