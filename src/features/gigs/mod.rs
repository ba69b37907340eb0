//! Gig lifecycle: brands post, admins moderate, models browse.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/gigs` | Brand | Post a gig (starts Pending) |
//! | GET | `/api/gigs` | Yes | Gigs visible to the caller |
//! | GET | `/api/gigs/{id}` | Yes | Single gig if visible |
//! | PATCH | `/api/gigs/{id}` | Brand (owner) | Edit while Pending |
//! | DELETE | `/api/gigs/{id}` | Brand (owner) / Admin | Delete with applications |
//!
//! Moderation routes are mounted under `/api/admin`.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod visibility;

pub use services::GigService;
