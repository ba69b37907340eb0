pub mod saved_list;

pub use saved_list::*;
