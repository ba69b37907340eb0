use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::debug;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::guards::{RequireBrand, RequireModel};
use crate::features::uploads::dtos::{ImageUploadForm, UploadReportDto};
use crate::features::uploads::models::UploadableFile;
use crate::features::uploads::services::UploadService;
use crate::shared::constants::UPLOAD_PART_PREFIX;
use crate::shared::types::ApiResponse;

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        debug!("Failed to read multipart data: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    }
}

/// Client id carried by the part name, or a fresh one
fn client_id(part_name: Option<&str>) -> String {
    part_name
        .and_then(|name| name.strip_prefix(UPLOAD_PART_PREFIX))
        .filter(|id| !id.trim().is_empty())
        .map(|id| id.trim().to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Collect every file part; plain form fields are ignored
async fn read_files(mut multipart: Multipart) -> Result<Vec<UploadableFile>> {
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(filename) = field.file_name().map(str::to_string) else {
            debug!("Ignoring non-file field {:?}", field.name());
            continue;
        };
        let id = client_id(field.name());
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field.bytes().await.map_err(multipart_error)?;

        files.push(UploadableFile::new(id, filename, content_type, data.to_vec()));
    }

    Ok(files)
}

#[utoipa::path(
    post,
    path = "/api/models/me/profile-image",
    request_body(content = ImageUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Upload processed", body = ApiResponse<UploadReportDto>),
        (status = 400, description = "No file, several files or not an image"),
        (status = 403, description = "Model access required"),
        (status = 413, description = "Image too large")
    ),
    tag = "uploads",
    security(("bearer_auth" = []))
)]
pub async fn upload_profile_image(
    RequireModel(user): RequireModel,
    State(service): State<Arc<UploadService>>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<UploadReportDto>>> {
    let files = read_files(multipart).await?;
    let report = service.upload_model_profile_image(&user.sub, files).await?;
    Ok(Json(ApiResponse::success(Some(report), None, None)))
}

/// Replace the whole portfolio
///
/// Stored images are removed first. Each part is reported on its own, so a
/// partly failed batch still answers 200 with `failed > 0`.
#[utoipa::path(
    put,
    path = "/api/models/me/portfolio",
    request_body(content = ImageUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Batch processed", body = ApiResponse<UploadReportDto>),
        (status = 400, description = "Empty or oversized batch"),
        (status = 403, description = "Model access required")
    ),
    tag = "uploads",
    security(("bearer_auth" = []))
)]
pub async fn replace_portfolio(
    RequireModel(user): RequireModel,
    State(service): State<Arc<UploadService>>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<UploadReportDto>>> {
    let files = read_files(multipart).await?;
    let report = service.replace_model_portfolio(&user.sub, files).await?;
    Ok(Json(ApiResponse::success(Some(report), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/brands/me/logo",
    request_body(content = ImageUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Upload processed", body = ApiResponse<UploadReportDto>),
        (status = 400, description = "No file, several files or not an image"),
        (status = 403, description = "Brand access required"),
        (status = 413, description = "Image too large")
    ),
    tag = "uploads",
    security(("bearer_auth" = []))
)]
pub async fn upload_brand_logo(
    RequireBrand(user): RequireBrand,
    State(service): State<Arc<UploadService>>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<UploadReportDto>>> {
    let files = read_files(multipart).await?;
    let report = service.upload_brand_logo(&user.sub, files).await?;
    Ok(Json(ApiResponse::success(Some(report), None, None)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;

    use super::client_id;
    use crate::core::config::UploadConfig;
    use crate::core::database::lazy_test_pool;
    use crate::features::auth::model::AuthenticatedUser;
    use crate::features::uploads::{routes, UploadService};
    use crate::modules::storage::memory::MemoryStorage;
    use crate::shared::test_helpers::{create_brand_user, create_model_user, with_user};

    fn server_as(user: AuthenticatedUser, storage: Arc<MemoryStorage>) -> TestServer {
        let config = UploadConfig {
            max_image_bytes: 16,
            max_files_per_batch: 3,
        };
        let service = Arc::new(UploadService::new(lazy_test_pool(), storage, config));
        TestServer::new(with_user(routes::routes(service), user)).unwrap()
    }

    fn png(bytes: usize) -> Part {
        Part::bytes(vec![7u8; bytes])
            .file_name("photo.png")
            .mime_type("image/png")
    }

    #[test]
    fn test_client_id_comes_from_part_name() {
        assert_eq!(client_id(Some("file:abc-1")), "abc-1");
        assert!(uuid::Uuid::parse_str(&client_id(Some("file:"))).is_ok());
        assert!(uuid::Uuid::parse_str(&client_id(Some("photo"))).is_ok());
        assert!(uuid::Uuid::parse_str(&client_id(None)).is_ok());
    }

    #[tokio::test]
    async fn test_brands_cannot_upload_model_images() {
        let storage = Arc::new(MemoryStorage::new());
        let form = MultipartForm::new().add_part("file:a", png(4));

        let response = server_as(create_brand_user(), storage)
            .post("/api/models/me/profile-image")
            .multipart(form)
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_oversize_logo_is_refused_before_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let form = MultipartForm::new().add_part("file:logo", png(17));

        let response = server_as(create_brand_user(), storage.clone())
            .post("/api/brands/me/logo")
            .multipart(form)
            .await;

        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
        assert!(storage.put_keys().is_empty());
    }

    #[tokio::test]
    async fn test_request_without_files_is_rejected() {
        let form = MultipartForm::new().add_text("caption", "hello");

        let response = server_as(create_model_user(), Arc::new(MemoryStorage::new()))
            .put("/api/models/me/portfolio")
            .multipart(form)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_too_many_portfolio_images_are_rejected() {
        let form = (0..4).fold(MultipartForm::new(), |form, i| {
            form.add_part(format!("file:{}", i), png(1))
        });

        let response = server_as(create_model_user(), Arc::new(MemoryStorage::new()))
            .put("/api/models/me/portfolio")
            .multipart(form)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
