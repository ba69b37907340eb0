use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireBrand;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::brand_profiles::dtos::{BrandProfileResponseDto, UpdateBrandProfileDto};
use crate::features::brand_profiles::services::BrandProfileService;
use crate::shared::types::ApiResponse;

/// Get the caller's brand profile
#[utoipa::path(
    get,
    path = "/api/brands/me",
    responses(
        (status = 200, description = "Profile retrieved", body = ApiResponse<BrandProfileResponseDto>),
        (status = 403, description = "Brand access required"),
        (status = 404, description = "Profile not found")
    ),
    tag = "brands",
    security(("bearer_auth" = []))
)]
pub async fn get_my_brand(
    RequireBrand(user): RequireBrand,
    State(service): State<Arc<BrandProfileService>>,
) -> Result<Json<ApiResponse<BrandProfileResponseDto>>> {
    let profile = service.get_my(&user.sub).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}

/// Partially update the caller's brand profile
#[utoipa::path(
    patch,
    path = "/api/brands/me",
    request_body = UpdateBrandProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<BrandProfileResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Brand access required")
    ),
    tag = "brands",
    security(("bearer_auth" = []))
)]
pub async fn update_my_brand(
    RequireBrand(user): RequireBrand,
    State(service): State<Arc<BrandProfileService>>,
    AppJson(dto): AppJson<UpdateBrandProfileDto>,
) -> Result<Json<ApiResponse<BrandProfileResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let profile = service.update_my(&user.sub, dto).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}

/// Ask an admin to verify the caller's brand
#[utoipa::path(
    post,
    path = "/api/brands/me/verification",
    responses(
        (status = 200, description = "Verification requested", body = ApiResponse<BrandProfileResponseDto>),
        (status = 403, description = "Brand access required"),
        (status = 409, description = "Brand is already pending or verified")
    ),
    tag = "brands",
    security(("bearer_auth" = []))
)]
pub async fn request_brand_verification(
    RequireBrand(user): RequireBrand,
    State(service): State<Arc<BrandProfileService>>,
) -> Result<Json<ApiResponse<BrandProfileResponseDto>>> {
    let profile = service.request_verification(&user.sub).await?;
    Ok(Json(ApiResponse::success(
        Some(profile),
        Some("Verification requested".to_string()),
        None,
    )))
}

/// Get a brand profile by id (any signed-in user; models see who posted a gig)
#[utoipa::path(
    get,
    path = "/api/brands/{id}",
    params(("id" = Uuid, Path, description = "Brand profile ID")),
    responses(
        (status = 200, description = "Profile retrieved", body = ApiResponse<BrandProfileResponseDto>),
        (status = 404, description = "Profile not found")
    ),
    tag = "brands",
    security(("bearer_auth" = []))
)]
pub async fn get_brand(
    _user: AuthenticatedUser,
    State(service): State<Arc<BrandProfileService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BrandProfileResponseDto>>> {
    let profile = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    use crate::core::database::lazy_test_pool;
    use crate::features::brand_profiles::{routes, BrandProfileService};
    use crate::shared::test_helpers::{create_brand_user, create_model_user, with_user};

    #[tokio::test]
    async fn test_models_cannot_edit_brand_profile() {
        let service = Arc::new(BrandProfileService::new(lazy_test_pool()));
        let server =
            TestServer::new(with_user(routes::routes(service), create_model_user())).unwrap();

        let response = server
            .patch("/api/brands/me")
            .json(&json!({ "industry": "fashion" }))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_invalid_website_is_rejected() {
        let service = Arc::new(BrandProfileService::new(lazy_test_pool()));
        let server =
            TestServer::new(with_user(routes::routes(service), create_brand_user())).unwrap();

        let response = server
            .patch("/api/brands/me")
            .json(&json!({ "website": "acme" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
