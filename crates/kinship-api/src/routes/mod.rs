//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{families, health, invites, members, roles};
use crate::state::AppState;

/// Create the main API router (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(family_routes())
        .merge(invite_routes())
        .merge(member_routes())
        .merge(role_routes())
}

/// Family routes
fn family_routes() -> Router<AppState> {
    Router::new()
        .route("/families", post(families::create_family))
        .route("/families/@me", get(families::get_my_family))
        .route("/families/@me/members", get(families::get_my_family_members))
}

/// Invite routes
fn invite_routes() -> Router<AppState> {
    Router::new()
        .route("/invites/:invite_code", get(invites::get_invite))
        .route("/invites/:invite_code/join", post(invites::join_family))
}

/// Member routes
fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/members/@me", get(members::get_my_membership))
        .route("/members/@me/role", get(members::get_my_role))
}

/// Role catalogue and daily board routes
fn role_routes() -> Router<AppState> {
    Router::new()
        .route("/roles", get(roles::list_role_kinds))
        .route("/families/@me/roles", get(roles::get_role_board))
        .route("/families/@me/roles/@me", put(roles::assign_my_role))
        .route("/role-assignments/:assignment_id", delete(roles::release_assignment))
}
