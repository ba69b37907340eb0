pub mod saved_list_service;

pub use saved_list_service::SavedListService;
