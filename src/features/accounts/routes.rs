use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::accounts::handlers;
use crate::features::accounts::services::AccountService;

pub fn routes(service: Arc<AccountService>) -> Router {
    Router::new()
        .route("/api/accounts/onboard", post(handlers::onboard))
        .route("/api/accounts/me", get(handlers::get_my_account))
        .with_state(service)
}
