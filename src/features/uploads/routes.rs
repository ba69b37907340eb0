use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{post, put},
    Router,
};

use crate::features::uploads::handlers;
use crate::features::uploads::services::UploadService;

/// Headroom for multipart boundaries and part headers
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn routes(service: Arc<UploadService>) -> Router {
    let config = service.config();
    let single_limit = config.max_image_bytes + MULTIPART_OVERHEAD;
    let batch_limit = config.max_image_bytes * config.max_files_per_batch + MULTIPART_OVERHEAD;

    Router::new()
        .route(
            "/api/models/me/profile-image",
            post(handlers::upload_profile_image).layer(DefaultBodyLimit::max(single_limit)),
        )
        .route(
            "/api/models/me/portfolio",
            put(handlers::replace_portfolio).layer(DefaultBodyLimit::max(batch_limit)),
        )
        .route(
            "/api/brands/me/logo",
            post(handlers::upload_brand_logo).layer(DefaultBodyLimit::max(single_limit)),
        )
        .with_state(service)
}
