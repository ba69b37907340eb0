pub mod brand_profile_dto;

pub use brand_profile_dto::*;
