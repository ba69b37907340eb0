//! Model profiles.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/models/me` | Model | Own profile |
//! | PATCH | `/api/models/me` | Model | Partial update |
//! | POST | `/api/models/me/verification` | Model | Request verification |
//! | GET | `/api/models` | Brand/Admin | Browse profiles |
//! | GET | `/api/models/{id}` | Brand/Admin | Single profile |
//!
//! Image uploads for profiles live in the `files` feature.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ModelProfileService;
