use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::brand_profiles::handlers;
use crate::features::brand_profiles::services::BrandProfileService;

pub fn routes(service: Arc<BrandProfileService>) -> Router {
    Router::new()
        .route(
            "/api/brands/me",
            get(handlers::get_my_brand).patch(handlers::update_my_brand),
        )
        .route(
            "/api/brands/me/verification",
            post(handlers::request_brand_verification),
        )
        .route("/api/brands/{id}", get(handlers::get_brand))
        .with_state(service)
}
