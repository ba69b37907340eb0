use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::model_profiles::handlers;
use crate::features::model_profiles::services::ModelProfileService;

pub fn routes(service: Arc<ModelProfileService>) -> Router {
    Router::new()
        .route("/api/models", get(handlers::list_profiles))
        .route(
            "/api/models/me",
            get(handlers::get_my_profile).patch(handlers::update_my_profile),
        )
        .route(
            "/api/models/me/verification",
            post(handlers::request_verification),
        )
        .route("/api/models/{id}", get(handlers::get_profile))
        .with_state(service)
}
