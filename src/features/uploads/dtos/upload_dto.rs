use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::uploads::models::UploadStatus;

/// Multipart form for image uploads
///
/// Documentation only; handlers read the multipart stream directly. Repeat
/// the part (`file:<id>`) once per image on the portfolio endpoint.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct ImageUploadForm {
    /// Image bytes; name the part `file:<client id>` to key the report entry
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}

/// Outcome of one submitted file
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadedFileDto {
    /// Client id from the part name, or a generated UUID
    pub id: String,
    pub filename: String,
    pub status: UploadStatus,
    pub error: Option<String>,
    pub url: Option<String>,
    /// 0 until stored, then 100
    pub progress: u8,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadReportDto {
    pub files: Vec<UploadedFileDto>,
    pub uploaded: usize,
    pub failed: usize,
    /// Image URL(s) the profile holds after the batch
    pub urls: Vec<String>,
}
