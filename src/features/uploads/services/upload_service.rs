use std::sync::Arc;

use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use super::coordinator::{delete_best_effort, upload_pending};
use crate::core::config::UploadConfig;
use crate::core::error::{AppError, Result};
use crate::features::accounts::services::{brand_for_sub, model_id_for_sub};
use crate::features::uploads::dtos::UploadReportDto;
use crate::features::uploads::models::{
    ImageSlot, ImageTarget, StagingError, UploadBatch, UploadableFile,
};
use crate::modules::storage::ObjectStorage;

/// Every previous image was deleted and none of the new ones made it
fn emptied_by_failures(previous: &[String], batch: &UploadBatch) -> bool {
    !previous.is_empty() && batch.uploaded() == 0
}

/// Profile column each target writes
fn column(target: ImageTarget) -> (&'static str, &'static str) {
    match target {
        ImageTarget::ModelProfileImage => ("model_profiles", "profile_image_url"),
        ImageTarget::ModelPortfolio => ("model_profiles", "portfolio_image_urls"),
        ImageTarget::BrandLogo => ("brand_profiles", "logo_url"),
    }
}

pub struct UploadService {
    pool: PgPool,
    storage: Arc<dyn ObjectStorage>,
    config: UploadConfig,
}

impl UploadService {
    pub fn new(pool: PgPool, storage: Arc<dyn ObjectStorage>, config: UploadConfig) -> Self {
        Self {
            pool,
            storage,
            config,
        }
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    pub async fn upload_model_profile_image(
        &self,
        sub: &str,
        files: Vec<UploadableFile>,
    ) -> Result<UploadReportDto> {
        let batch = self.stage(ImageTarget::ModelProfileImage, files)?;
        let model_id = model_id_for_sub(&self.pool, sub).await?;
        self.replace_single(ImageTarget::ModelProfileImage, model_id, batch)
            .await
    }

    pub async fn replace_model_portfolio(
        &self,
        sub: &str,
        files: Vec<UploadableFile>,
    ) -> Result<UploadReportDto> {
        let batch = self.stage(ImageTarget::ModelPortfolio, files)?;
        let model_id = model_id_for_sub(&self.pool, sub).await?;
        self.replace_all(ImageTarget::ModelPortfolio, model_id, batch)
            .await
    }

    pub async fn upload_brand_logo(
        &self,
        sub: &str,
        files: Vec<UploadableFile>,
    ) -> Result<UploadReportDto> {
        let batch = self.stage(ImageTarget::BrandLogo, files)?;
        let brand = brand_for_sub(&self.pool, sub).await?;
        self.replace_single(ImageTarget::BrandLogo, brand.id, batch)
            .await
    }

    /// Check batch shape and tag unacceptable files, before any lookup or storage call
    pub fn stage(&self, target: ImageTarget, files: Vec<UploadableFile>) -> Result<UploadBatch> {
        if files.is_empty() {
            return Err(AppError::BadRequest("No files submitted".to_string()));
        }

        match target.slot() {
            ImageSlot::Single if files.len() > 1 => {
                return Err(AppError::BadRequest(
                    "Exactly one image is accepted here".to_string(),
                ));
            }
            ImageSlot::ReplaceAll if files.len() > self.config.max_files_per_batch => {
                return Err(AppError::BadRequest(format!(
                    "At most {} images per upload",
                    self.config.max_files_per_batch
                )));
            }
            _ => {}
        }

        let batch = UploadBatch::stage(files, &self.config);

        if target.slot() == ImageSlot::Single {
            match batch.first_rejection(&self.config) {
                Some(StagingError::TooLarge) => {
                    return Err(AppError::PayloadTooLarge(format!(
                        "Image exceeds the {} byte limit",
                        self.config.max_image_bytes
                    )));
                }
                Some(StagingError::NotAnImage) => {
                    let reason = batch
                        .files
                        .first()
                        .and_then(|f| f.error.clone())
                        .unwrap_or_else(|| "Unsupported file type".to_string());
                    return Err(AppError::BadRequest(reason));
                }
                None => {}
            }
        }

        Ok(batch)
    }

    /// Upload, patch the profile, then drop the previous object
    async fn replace_single(
        &self,
        target: ImageTarget,
        owner: Uuid,
        mut batch: UploadBatch,
    ) -> Result<UploadReportDto> {
        let (table, column) = column(target);
        let previous: Option<String> =
            sqlx::query_scalar(&format!("SELECT {column} FROM {table} WHERE id = $1"))
                .bind(owner)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        upload_pending(self.storage.as_ref(), &mut batch, target.key_prefix(), owner).await;

        let Some(url) = batch.urls().into_iter().next() else {
            return Ok(batch.into_report(previous.into_iter().collect()));
        };

        sqlx::query(&format!(
            "UPDATE {table} SET {column} = $2, updated_at = NOW() WHERE id = $1"
        ))
        .bind(owner)
        .bind(&url)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "Image update conflict"))?;

        info!("Replaced {} of {} {}", column, table, owner);

        if let Some(old) = previous.filter(|old| *old != url) {
            delete_best_effort(self.storage.as_ref(), &[old]).await;
        }

        Ok(batch.into_report(vec![url]))
    }

    /// Delete everything stored, upload the batch and store the survivors
    async fn replace_all(
        &self,
        target: ImageTarget,
        owner: Uuid,
        mut batch: UploadBatch,
    ) -> Result<UploadReportDto> {
        let (table, column) = column(target);
        let previous: Vec<String> =
            sqlx::query_scalar(&format!("SELECT {column} FROM {table} WHERE id = $1"))
                .bind(owner)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        // Nothing acceptable: keep what the profile already has
        if batch.pending_count() == 0 {
            return Ok(batch.into_report(previous));
        }

        delete_best_effort(self.storage.as_ref(), &previous).await;
        upload_pending(self.storage.as_ref(), &mut batch, target.key_prefix(), owner).await;

        let urls = batch.urls();
        sqlx::query(&format!(
            "UPDATE {table} SET {column} = $2, updated_at = NOW() WHERE id = $1"
        ))
        .bind(owner)
        .bind(&urls)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "Image update conflict"))?;

        if emptied_by_failures(&previous, &batch) {
            warn!(
                "{} of {} {} is now empty: {} previous images deleted, all {} uploads failed",
                column,
                table,
                owner,
                previous.len(),
                batch.failed()
            );
        }

        info!(
            "Replaced {} of {} {}: {} stored, {} failed",
            column,
            table,
            owner,
            batch.uploaded(),
            batch.failed()
        );

        Ok(batch.into_report(urls))
    }
}
