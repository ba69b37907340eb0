//! Brand profiles.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/brands/me` | Brand | Own profile |
//! | PATCH | `/api/brands/me` | Brand | Partial update |
//! | POST | `/api/brands/me/verification` | Brand | Request verification |
//! | GET | `/api/brands/{id}` | Yes | Public brand card |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::BrandProfileService;
