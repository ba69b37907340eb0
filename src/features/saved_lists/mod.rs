//! Brand-curated lists of model profiles.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET/POST | `/api/saved-lists` | Brand | List / create |
//! | GET/PATCH/DELETE | `/api/saved-lists/{id}` | Brand (owner) | Read / rename / delete |
//! | POST | `/api/saved-lists/{id}/models` | Brand (owner) | Add models (idempotent) |
//! | DELETE | `/api/saved-lists/{id}/models/{model_id}` | Brand (owner) | Remove a model |
//!
//! Every write answers with the list as stored.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::SavedListService;
