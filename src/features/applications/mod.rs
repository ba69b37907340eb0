//! Application funnel: models apply to verified gigs, brands move applicants
//! through review stages.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/gigs/{id}/applications` | Model | Apply for a gig |
//! | GET | `/api/gigs/{id}/applications` | Brand (owner) | Applicants of a gig |
//! | PATCH | `/api/applications/{id}/status` | Brand (owner) | Move an applicant |
//! | GET | `/api/applications/me` | Model | Own applications |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ApplicationService;
