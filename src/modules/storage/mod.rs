//! Storage module for profile images
//!
//! `ObjectStorage` is the seam the upload coordinator depends on; the MinIO
//! client is the production implementation.

mod minio_client;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;

use crate::core::error::AppError;

pub use minio_client::MinIOClient;

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `data` under `key` and return its public URL
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<String, AppError>;

    /// Delete the object a previously returned URL points to
    async fn delete_url(&self, url: &str) -> Result<(), AppError>;
}
