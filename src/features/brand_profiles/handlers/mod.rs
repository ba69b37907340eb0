pub mod brand_profile_handler;

pub use brand_profile_handler::*;
