mod coordinator;
pub mod upload_service;

pub use upload_service::UploadService;
