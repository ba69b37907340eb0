use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::admin::handlers;
use crate::features::admin::services::AdminService;

/// Admin routes, mounted under `/api/admin`
pub fn routes(admin_service: Arc<AdminService>) -> Router {
    Router::new()
        .route("/overview", get(handlers::get_overview))
        .route("/gigs", get(handlers::list_gigs))
        .route("/gigs/{id}/status", patch(handlers::moderate_gig))
        .route("/models", get(handlers::list_models))
        .route(
            "/models/{id}/verification",
            patch(handlers::set_model_verification),
        )
        .route("/brands", get(handlers::list_brands))
        .route(
            "/brands/{id}/verification",
            patch(handlers::set_brand_verification),
        )
        .with_state(admin_service)
}
