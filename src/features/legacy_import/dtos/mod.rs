pub mod import_dto;

pub use import_dto::*;
