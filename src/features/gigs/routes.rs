use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::gigs::handlers;
use crate::features::gigs::services::GigService;

pub fn routes(service: Arc<GigService>) -> Router {
    Router::new()
        .route(
            "/api/gigs",
            get(handlers::list_gigs).post(handlers::create_gig),
        )
        .route(
            "/api/gigs/{id}",
            get(handlers::get_gig)
                .patch(handlers::update_gig)
                .delete(handlers::delete_gig),
        )
        .with_state(service)
}
