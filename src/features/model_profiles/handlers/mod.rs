pub mod model_profile_handler;

pub use model_profile_handler::*;
