use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::features::password_resets::handlers;
use crate::features::password_resets::services::PasswordResetService;

/// Served without authentication
pub fn public_routes(service: Arc<PasswordResetService>) -> Router {
    Router::new()
        .route("/api/password-reset-requests", post(handlers::create_request))
        .with_state(service)
}

/// Mounted under `/api/admin`
pub fn admin_routes(service: Arc<PasswordResetService>) -> Router {
    Router::new()
        .route("/password-reset-requests", get(handlers::list_requests))
        .route(
            "/password-reset-requests/{id}/resolve",
            patch(handlers::resolve_request),
        )
        .with_state(service)
}
