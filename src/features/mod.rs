pub mod accounts;
pub mod admin;
pub mod applications;
pub mod auth;
pub mod brand_profiles;
pub mod gigs;
pub mod legacy_import;
pub mod model_profiles;
pub mod password_resets;
pub mod saved_lists;
pub mod uploads;
