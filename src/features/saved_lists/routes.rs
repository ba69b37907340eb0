use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::features::saved_lists::handlers;
use crate::features::saved_lists::services::SavedListService;

pub fn routes(service: Arc<SavedListService>) -> Router {
    Router::new()
        .route(
            "/api/saved-lists",
            get(handlers::list_lists).post(handlers::create_list),
        )
        .route(
            "/api/saved-lists/{id}",
            get(handlers::get_list)
                .patch(handlers::rename_list)
                .delete(handlers::delete_list),
        )
        .route("/api/saved-lists/{id}/models", post(handlers::add_models))
        .route(
            "/api/saved-lists/{id}/models/{model_id}",
            delete(handlers::remove_model),
        )
        .with_state(service)
}
