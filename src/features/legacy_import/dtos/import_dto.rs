use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Multipart form for the legacy import (documentation only)
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct LegacyImportForm {
    /// `users.csv`: `sub,email,role`
    #[schema(format = Binary, content_media_type = "text/csv")]
    pub users: Option<String>,
    /// `models.csv`: `sub,full_name,gender,date_of_birth,height_cm,location,bio,instagram_handle,phone`
    #[schema(format = Binary, content_media_type = "text/csv")]
    pub models: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImportCountsDto {
    pub imported: usize,
    /// Rows whose account or profile already existed
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImportRowErrorDto {
    /// `users` or `models`
    pub file: String,
    /// 1-based line in the CSV, header included
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ImportReportDto {
    pub users: ImportCountsDto,
    pub models: ImportCountsDto,
    pub errors: Vec<ImportRowErrorDto>,
}
