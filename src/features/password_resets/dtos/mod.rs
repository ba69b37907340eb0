pub mod password_reset_dto;

pub use password_reset_dto::*;
