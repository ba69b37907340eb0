pub mod account_service;
pub mod identity;

pub use account_service::AccountService;
pub use identity::{brand_for_sub, model_id_for_sub, BrandIdentity};
