pub mod saved_list_handler;

pub use saved_list_handler::*;
