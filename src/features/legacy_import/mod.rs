//! One-off import of the legacy CSV exports.
//!
//! `POST /api/admin/import` takes multipart parts `users` (`sub,email,role`)
//! and `models` (`sub,full_name,gender,date_of_birth,height_cm,location,bio,
//! instagram_handle,phone`). Valid rows are inserted, rows whose key already
//! exists are skipped, and invalid rows are reported with their line number.
//! The database stays the only source of truth; nothing reads CSV afterwards.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ImportService;
