//! Storage side of a batch: parallel puts and best-effort deletes.

use futures::future::join_all;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::features::uploads::models::{UploadBatch, UploadStatus};
use crate::modules::storage::ObjectStorage;

/// Upload every pending file at once; each file records its own outcome
pub async fn upload_pending(
    storage: &dyn ObjectStorage,
    batch: &mut UploadBatch,
    key_prefix: &str,
    owner: Uuid,
) {
    let uploads = batch
        .files
        .iter_mut()
        .filter(|file| file.is_pending())
        .map(move |file| async move {
            file.status = UploadStatus::Uploading;
            let key = format!("{}/{}/{}.{}", key_prefix, owner, Uuid::new_v4(), file.extension());
            let data = std::mem::take(&mut file.data);

            match storage.put(&key, data, &file.content_type).await {
                Ok(url) => {
                    debug!("Stored upload '{}' as {}", file.id, key);
                    file.succeed(url);
                }
                Err(e) => {
                    warn!("Upload '{}' failed: {}", file.id, e);
                    file.fail(e.to_string());
                }
            }
        });

    join_all(uploads).await;
}

/// Delete stored objects in parallel; failures are logged and skipped
pub async fn delete_best_effort(storage: &dyn ObjectStorage, urls: &[String]) {
    let deletes = urls.iter().map(move |url| async move {
        if let Err(e) = storage.delete_url(url).await {
            warn!("Could not delete previous image {}: {}", url, e);
        }
    });

    join_all(deletes).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::UploadConfig;
    use crate::features::uploads::models::UploadableFile;
    use crate::modules::storage::memory::{MemoryStorage, MEMORY_BASE_URL};

    fn image(id: &str, size: usize) -> UploadableFile {
        UploadableFile::new(
            id.to_string(),
            format!("{}.png", id),
            "image/png".to_string(),
            vec![1u8; size],
        )
    }

    fn config() -> UploadConfig {
        UploadConfig {
            max_image_bytes: 16,
            max_files_per_batch: 10,
        }
    }

    #[tokio::test]
    async fn test_oversize_files_never_reach_storage() {
        let storage = MemoryStorage::new();
        let mut batch = UploadBatch::stage(vec![image("small", 4), image("huge", 17)], &config());

        upload_pending(&storage, &mut batch, "models/portfolio", Uuid::new_v4()).await;

        assert_eq!(storage.put_keys().len(), 1);
        assert_eq!(batch.uploaded(), 1);
        assert_eq!(batch.failed(), 1);
        assert_eq!(batch.files[1].status, UploadStatus::Failed);
    }

    #[tokio::test]
    async fn test_one_failed_put_does_not_sink_the_batch() {
        let storage = MemoryStorage::new();
        storage.fail_puts_matching(".jpg");
        let mut jpeg = image("b", 1);
        jpeg.content_type = "image/jpeg".to_string();
        let mut batch = UploadBatch::stage(vec![image("a", 1), jpeg, image("c", 1)], &config());

        upload_pending(&storage, &mut batch, "models/portfolio", Uuid::new_v4()).await;

        assert_eq!(batch.uploaded(), 2);
        assert_eq!(batch.failed(), 1);
        assert_eq!(batch.files[1].status, UploadStatus::Failed);
        assert!(batch.files[1].url.is_none());
        assert_eq!(batch.urls().len(), 2);
    }

    #[tokio::test]
    async fn test_keys_are_scoped_to_owner() {
        let storage = MemoryStorage::new();
        let owner = Uuid::new_v4();
        let mut batch = UploadBatch::stage(vec![image("a", 1), image("b", 1)], &config());

        upload_pending(&storage, &mut batch, "models/portfolio", owner).await;

        assert!(batch.urls().iter().all(|u| u.starts_with(MEMORY_BASE_URL)));
        assert!(storage
            .put_keys()
            .iter()
            .all(|k| k.starts_with(&format!("models/portfolio/{}/", owner))));
    }

    #[tokio::test]
    async fn test_urls_follow_submission_order() {
        let storage = MemoryStorage::new();
        let mut batch = UploadBatch::stage(vec![image("first", 1), image("second", 1)], &config());

        upload_pending(&storage, &mut batch, "brands/logo", Uuid::new_v4()).await;

        let urls = batch.urls();
        assert_eq!(urls[0], batch.files[0].url.clone().unwrap());
        assert_eq!(urls[1], batch.files[1].url.clone().unwrap());
    }

    #[tokio::test]
    async fn test_delete_failures_are_swallowed() {
        let storage = MemoryStorage::new();
        let broken = format!("{}/models/portfolio/old-1.png", MEMORY_BASE_URL);
        let fine = format!("{}/models/portfolio/old-2.png", MEMORY_BASE_URL);
        storage.fail_delete_of(&broken);

        delete_best_effort(&storage, &[broken.clone(), fine.clone()]).await;

        let deleted = storage.deleted_urls();
        assert!(deleted.contains(&broken));
        assert!(deleted.contains(&fine));
    }
}
