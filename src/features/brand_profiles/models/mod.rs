pub mod brand_profile;

pub use brand_profile::*;
