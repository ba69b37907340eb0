use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::config::UploadConfig;
use crate::features::uploads::dtos::{UploadReportDto, UploadedFileDto};
use crate::shared::constants::ALLOWED_IMAGE_MIME_TYPES;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    Pending,
    Uploading,
    Success,
    Failed,
}

/// One file of a batch, tracked from staging until storage answers
#[derive(Debug, Clone)]
pub struct UploadableFile {
    pub id: String,
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
    pub status: UploadStatus,
    pub error: Option<String>,
    pub progress: u8,
    pub url: Option<String>,
}

impl UploadableFile {
    pub fn new(id: String, filename: String, content_type: String, data: Vec<u8>) -> Self {
        Self {
            id,
            filename,
            content_type,
            data,
            status: UploadStatus::Pending,
            error: None,
            progress: 0,
            url: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == UploadStatus::Pending
    }

    pub fn fail(&mut self, error: impl Into<String>) {
        self.status = UploadStatus::Failed;
        self.error = Some(error.into());
    }

    pub fn succeed(&mut self, url: String) {
        self.status = UploadStatus::Success;
        self.progress = 100;
        self.url = Some(url);
    }

    pub fn extension(&self) -> &'static str {
        match self.content_type.as_str() {
            "image/jpeg" => "jpg",
            "image/png" => "png",
            "image/webp" => "webp",
            _ => "bin",
        }
    }

    /// Reason this file may not be uploaded, if any
    fn rejection(&self, config: &UploadConfig) -> Option<StagingError> {
        if self.data.len() > config.max_image_bytes {
            return Some(StagingError::TooLarge);
        }
        if !ALLOWED_IMAGE_MIME_TYPES.contains(&self.content_type.as_str()) {
            return Some(StagingError::NotAnImage);
        }
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagingError {
    TooLarge,
    NotAnImage,
}

/// Files submitted together for one image slot
#[derive(Debug, Clone, Default)]
pub struct UploadBatch {
    pub files: Vec<UploadableFile>,
}

impl UploadBatch {
    /// Tag every file that must not reach storage as failed
    pub fn stage(files: Vec<UploadableFile>, config: &UploadConfig) -> Self {
        let files = files
            .into_iter()
            .map(|mut file| {
                match file.rejection(config) {
                    Some(StagingError::TooLarge) => file.fail(format!(
                        "File exceeds the {} byte limit",
                        config.max_image_bytes
                    )),
                    Some(StagingError::NotAnImage) => file.fail(format!(
                        "Unsupported file type '{}'. Allowed: {}",
                        file.content_type,
                        ALLOWED_IMAGE_MIME_TYPES.join(", ")
                    )),
                    None => {}
                }
                file
            })
            .collect();
        Self { files }
    }

    /// Why the first refused file was refused; meaningful only right after staging
    pub fn first_rejection(&self, config: &UploadConfig) -> Option<StagingError> {
        self.files.iter().find_map(|f| f.rejection(config))
    }

    pub fn pending_count(&self) -> usize {
        self.files.iter().filter(|f| f.is_pending()).count()
    }

    pub fn uploaded(&self) -> usize {
        self.count(UploadStatus::Success)
    }

    pub fn failed(&self) -> usize {
        self.count(UploadStatus::Failed)
    }

    fn count(&self, status: UploadStatus) -> usize {
        self.files.iter().filter(|f| f.status == status).count()
    }

    /// URLs of stored files, in submission order
    pub fn urls(&self) -> Vec<String> {
        self.files.iter().filter_map(|f| f.url.clone()).collect()
    }

    pub fn into_report(self, current_urls: Vec<String>) -> UploadReportDto {
        let uploaded = self.uploaded();
        let failed = self.failed();
        UploadReportDto {
            files: self
                .files
                .into_iter()
                .map(|f| UploadedFileDto {
                    id: f.id,
                    filename: f.filename,
                    status: f.status,
                    error: f.error,
                    url: f.url,
                    progress: f.progress,
                })
                .collect(),
            uploaded,
            failed,
            urls: current_urls,
        }
    }
}

/// How a batch replaces what the profile already holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot {
    Single,
    ReplaceAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageTarget {
    ModelProfileImage,
    ModelPortfolio,
    BrandLogo,
}

impl ImageTarget {
    pub fn slot(self) -> ImageSlot {
        match self {
            ImageTarget::ModelPortfolio => ImageSlot::ReplaceAll,
            ImageTarget::ModelProfileImage | ImageTarget::BrandLogo => ImageSlot::Single,
        }
    }

    pub fn key_prefix(self) -> &'static str {
        match self {
            ImageTarget::ModelProfileImage => "models/profile",
            ImageTarget::ModelPortfolio => "models/portfolio",
            ImageTarget::BrandLogo => "brands/logo",
        }
    }
}
