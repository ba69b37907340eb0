pub mod model_profile;

pub use model_profile::*;
