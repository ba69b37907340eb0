pub mod model_profile_service;

pub use model_profile_service::ModelProfileService;
