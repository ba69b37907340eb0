pub mod admin_dto;

pub use admin_dto::*;
