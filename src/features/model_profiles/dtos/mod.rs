pub mod model_profile_dto;

pub use model_profile_dto::*;
