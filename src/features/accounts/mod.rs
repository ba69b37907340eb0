//! Accounts: the marketplace-side record of an identity-provider subject.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/accounts/onboard` | Yes | Create account and empty profile |
//! | GET | `/api/accounts/me` | Yes | Current account with profile id |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::AccountService;
