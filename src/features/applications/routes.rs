use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::features::applications::handlers;
use crate::features::applications::services::ApplicationService;

pub fn routes(service: Arc<ApplicationService>) -> Router {
    Router::new()
        .route(
            "/api/gigs/{id}/applications",
            post(handlers::apply_for_gig).get(handlers::list_applicants),
        )
        .route("/api/applications/me", get(handlers::list_my_applications))
        .route(
            "/api/applications/{id}/status",
            patch(handlers::update_application_status),
        )
        .with_state(service)
}
