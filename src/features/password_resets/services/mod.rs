pub mod password_reset_service;

pub use password_reset_service::PasswordResetService;
