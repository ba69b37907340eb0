//! Profile image uploads.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/models/me/profile-image` | Model | Replace the profile image |
//! | PUT | `/api/models/me/portfolio` | Model | Replace the whole portfolio |
//! | POST | `/api/brands/me/logo` | Brand | Replace the company logo |
//!
//! Files arrive as multipart parts named `file:<client id>`; the id keys the
//! per-file report. Files that are too large or not images are reported as
//! failed and never reach storage.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::UploadService;
