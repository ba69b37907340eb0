pub mod account_handler;

pub use account_handler::{__path_get_my_account, __path_onboard, get_my_account, onboard};
