//! Password reset requests, handled by hand.
//!
//! Anyone may ask for a reset; admins work the queue and mark requests
//! resolved once they have helped the user through the identity provider.
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/password-reset-requests` | Public | Open a request (idempotent per email) |
//! | GET | `/api/admin/password-reset-requests` | Admin | List requests |
//! | PATCH | `/api/admin/password-reset-requests/{id}/resolve` | Admin | Resolve a request |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::PasswordResetService;
