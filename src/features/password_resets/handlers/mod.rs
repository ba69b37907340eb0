pub mod password_reset_handler;

pub use password_reset_handler::*;
