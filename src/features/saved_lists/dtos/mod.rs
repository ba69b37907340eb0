pub mod saved_list_dto;

pub use saved_list_dto::*;
