pub mod brand_profile_service;

pub use brand_profile_service::BrandProfileService;
