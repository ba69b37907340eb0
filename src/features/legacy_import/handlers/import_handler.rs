use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::auth::guards::RequireAdmin;
use crate::features::legacy_import::dtos::{ImportReportDto, LegacyImportForm};
use crate::features::legacy_import::services::import_service::{MODELS_FILE, USERS_FILE};
use crate::features::legacy_import::services::ImportService;
use crate::shared::types::ApiResponse;

/// Import legacy `users.csv` / `models.csv`
///
/// Existing accounts and profiles are left untouched and counted as skipped.
/// Per-row validation errors come back in `errors` with their line numbers.
#[utoipa::path(
    post,
    path = "/api/admin/import",
    request_body(content = LegacyImportForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Import finished", body = ApiResponse<ImportReportDto>),
        (status = 400, description = "No CSV file supplied"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
pub async fn import_legacy_csv(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<ImportService>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<ImportReportDto>>> {
    let mut users = None;
    let mut models = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let name = field.name().unwrap_or("").to_string();
        let slot = match name.as_str() {
            USERS_FILE => &mut users,
            MODELS_FILE => &mut models,
            _ => {
                debug!("Ignoring unknown field: {}", name);
                continue;
            }
        };

        let data = field.bytes().await.map_err(|e| {
            AppError::BadRequest(format!("Failed to read '{}' file: {}", name, e))
        })?;
        *slot = Some(data.to_vec());
    }

    let report = service.import(&user.sub, users, models).await?;
    Ok(Json(ApiResponse::success(Some(report), None, None)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{http::StatusCode, Router};
    use axum_test::multipart::MultipartForm;
    use axum_test::TestServer;

    use crate::core::database::lazy_test_pool;
    use crate::features::auth::model::AuthenticatedUser;
    use crate::features::legacy_import::{routes, ImportService};
    use crate::shared::test_helpers::{create_admin_user, create_brand_user, with_user};

    fn server_as(user: AuthenticatedUser) -> TestServer {
        let service = Arc::new(ImportService::new(lazy_test_pool()));
        let app = Router::new().nest("/api/admin", routes::routes(service));
        TestServer::new(with_user(app, user)).unwrap()
    }

    #[tokio::test]
    async fn test_import_is_admin_only() {
        let form = MultipartForm::new().add_text("users", "sub,email,role\n");
        let response = server_as(create_brand_user())
            .post("/api/admin/import")
            .multipart(form)
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_unrelated_parts_count_as_no_file() {
        let form = MultipartForm::new().add_text("notes", "hello");
        let response = server_as(create_admin_user())
            .post("/api/admin/import")
            .multipart(form)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
