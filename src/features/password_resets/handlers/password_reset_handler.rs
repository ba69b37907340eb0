use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::guards::RequireAdmin;
use crate::features::password_resets::dtos::{
    CreatePasswordResetDto, PasswordResetQueryParams, PasswordResetResponseDto,
};
use crate::features::password_resets::services::PasswordResetService;
use crate::shared::types::{ApiResponse, Meta};

/// Ask an admin for a password reset
///
/// No token needed. While a request for the same email is still open, the
/// existing request is returned with 200 instead of creating another.
#[utoipa::path(
    post,
    path = "/api/password-reset-requests",
    request_body = CreatePasswordResetDto,
    responses(
        (status = 201, description = "Request opened", body = ApiResponse<PasswordResetResponseDto>),
        (status = 200, description = "A request is already open", body = ApiResponse<PasswordResetResponseDto>),
        (status = 400, description = "Invalid email")
    ),
    tag = "password-resets"
)]
pub async fn create_request(
    State(service): State<Arc<PasswordResetService>>,
    AppJson(dto): AppJson<CreatePasswordResetDto>,
) -> Result<(StatusCode, Json<ApiResponse<PasswordResetResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (request, created) = service.create(&dto.email).await?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(ApiResponse::success(Some(request), None, None))))
}

#[utoipa::path(
    get,
    path = "/api/admin/password-reset-requests",
    params(PasswordResetQueryParams),
    responses(
        (status = 200, description = "List of requests", body = ApiResponse<Vec<PasswordResetResponseDto>>),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
pub async fn list_requests(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<PasswordResetService>>,
    AppQuery(params): AppQuery<PasswordResetQueryParams>,
) -> Result<Json<ApiResponse<Vec<PasswordResetResponseDto>>>> {
    let (items, total) = service.list(&params).await?;
    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

#[utoipa::path(
    patch,
    path = "/api/admin/password-reset-requests/{id}/resolve",
    params(("id" = Uuid, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request resolved", body = ApiResponse<PasswordResetResponseDto>),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request already resolved")
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
pub async fn resolve_request(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<PasswordResetService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PasswordResetResponseDto>>> {
    let request = service.resolve(&user.sub, id).await?;
    Ok(Json(ApiResponse::success(Some(request), None, None)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{http::StatusCode, Router};
    use axum_test::TestServer;
    use serde_json::json;

    use crate::core::database::lazy_test_pool;
    use crate::features::password_resets::{routes, PasswordResetService};
    use crate::shared::test_helpers::{create_brand_user, with_user};

    fn service() -> Arc<PasswordResetService> {
        Arc::new(PasswordResetService::new(lazy_test_pool()))
    }

    #[tokio::test]
    async fn test_invalid_email_is_rejected_without_a_token() {
        let server = TestServer::new(routes::public_routes(service())).unwrap();

        let response = server
            .post("/api/password-reset-requests")
            .json(&json!({ "email": "not-an-email" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_email_is_rejected() {
        let server = TestServer::new(routes::public_routes(service())).unwrap();

        let response = server
            .post("/api/password-reset-requests")
            .json(&json!({}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_queue_is_admin_only() {
        let app = Router::new().nest("/api/admin", routes::admin_routes(service()));
        let server = TestServer::new(with_user(app, create_brand_user())).unwrap();

        let response = server.get("/api/admin/password-reset-requests").await;
        response.assert_status(StatusCode::FORBIDDEN);
    }
}
