//! Moderation views.
//!
//! Nested under `/api/admin`; every route requires the `admin` role.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/overview` | Counts awaiting attention |
//! | GET | `/gigs` | All gigs, any status |
//! | PATCH | `/gigs/{id}/status` | Verify or reject a pending gig |
//! | GET | `/models` | Model profiles by verification status |
//! | PATCH | `/models/{id}/verification` | Set model verification |
//! | GET | `/brands` | Brand profiles by verification status |
//! | PATCH | `/brands/{id}/verification` | Set brand verification |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::AdminService;
