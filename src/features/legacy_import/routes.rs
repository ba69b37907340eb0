use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::legacy_import::handlers;
use crate::features::legacy_import::services::ImportService;

/// Mounted under `/api/admin`
pub fn routes(service: Arc<ImportService>) -> Router {
    Router::new()
        .route("/import", post(handlers::import_legacy_csv))
        .with_state(service)
}
