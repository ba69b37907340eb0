pub mod password_reset_request;

pub use password_reset_request::*;
