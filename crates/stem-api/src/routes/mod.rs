//! Route definitions
//!
//! `/health` is public; everything else lives under `/api` behind the bearer token.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{generation, health, members, nickname, not_found, roles};
use crate::state::AppState;

/// Create the main router with all routes and the 404 fallback
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .nest("/api", api_routes())
        .fallback(not_found)
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health::health_check))
}

/// Authenticated API routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(role_routes())
        .merge(nickname_routes())
        .merge(member_routes())
        .route("/generation", post(generation::create_generation))
}

/// Role sync routes
fn role_routes() -> Router<AppState> {
    Router::new()
        .route("/roles/sync", post(roles::sync_member))
        .route("/roles/sync-all", post(roles::sync_all))
}

/// Nickname routes
fn nickname_routes() -> Router<AppState> {
    Router::new()
        .route("/nickname", get(nickname::get_nickname))
        .route("/nickname/update", post(nickname::update_nickname))
}

/// Member routes
fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/member/status", get(members::member_status))
        .route("/members", get(members::list_members))
}
