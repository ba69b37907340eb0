use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::guards::{RequireModel, RequireTalentViewer};
use crate::features::model_profiles::dtos::{
    ModelProfileQueryParams, ModelProfileResponseDto, UpdateModelProfileDto,
};
use crate::features::model_profiles::services::ModelProfileService;
use crate::shared::types::{ApiResponse, Meta};

/// Get the caller's model profile
#[utoipa::path(
    get,
    path = "/api/models/me",
    responses(
        (status = 200, description = "Profile retrieved", body = ApiResponse<ModelProfileResponseDto>),
        (status = 403, description = "Model access required"),
        (status = 404, description = "Profile not found")
    ),
    tag = "models",
    security(("bearer_auth" = []))
)]
pub async fn get_my_profile(
    RequireModel(user): RequireModel,
    State(service): State<Arc<ModelProfileService>>,
) -> Result<Json<ApiResponse<ModelProfileResponseDto>>> {
    let profile = service.get_my(&user.sub).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}

/// Partially update the caller's model profile
#[utoipa::path(
    patch,
    path = "/api/models/me",
    request_body = UpdateModelProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<ModelProfileResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Model access required"),
        (status = 404, description = "Profile not found")
    ),
    tag = "models",
    security(("bearer_auth" = []))
)]
pub async fn update_my_profile(
    RequireModel(user): RequireModel,
    State(service): State<Arc<ModelProfileService>>,
    AppJson(dto): AppJson<UpdateModelProfileDto>,
) -> Result<Json<ApiResponse<ModelProfileResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let profile = service.update_my(&user.sub, dto).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}

/// Ask an admin to verify the caller's profile
#[utoipa::path(
    post,
    path = "/api/models/me/verification",
    responses(
        (status = 200, description = "Verification requested", body = ApiResponse<ModelProfileResponseDto>),
        (status = 403, description = "Model access required"),
        (status = 409, description = "Profile is already pending or verified")
    ),
    tag = "models",
    security(("bearer_auth" = []))
)]
pub async fn request_verification(
    RequireModel(user): RequireModel,
    State(service): State<Arc<ModelProfileService>>,
) -> Result<Json<ApiResponse<ModelProfileResponseDto>>> {
    let profile = service.request_verification(&user.sub).await?;
    Ok(Json(ApiResponse::success(
        Some(profile),
        Some("Verification requested".to_string()),
        None,
    )))
}

/// Browse model profiles
#[utoipa::path(
    get,
    path = "/api/models",
    params(ModelProfileQueryParams),
    responses(
        (status = 200, description = "Profiles retrieved", body = ApiResponse<Vec<ModelProfileResponseDto>>),
        (status = 403, description = "Brand or admin access required")
    ),
    tag = "models",
    security(("bearer_auth" = []))
)]
pub async fn list_profiles(
    RequireTalentViewer(_user): RequireTalentViewer,
    State(service): State<Arc<ModelProfileService>>,
    AppQuery(params): AppQuery<ModelProfileQueryParams>,
) -> Result<Json<ApiResponse<Vec<ModelProfileResponseDto>>>> {
    let (profiles, total) = service.list(&params).await?;
    Ok(Json(ApiResponse::success(
        Some(profiles),
        None,
        Some(Meta { total }),
    )))
}

/// Get a model profile by id
#[utoipa::path(
    get,
    path = "/api/models/{id}",
    params(("id" = Uuid, Path, description = "Model profile ID")),
    responses(
        (status = 200, description = "Profile retrieved", body = ApiResponse<ModelProfileResponseDto>),
        (status = 403, description = "Brand or admin access required"),
        (status = 404, description = "Profile not found")
    ),
    tag = "models",
    security(("bearer_auth" = []))
)]
pub async fn get_profile(
    RequireTalentViewer(_user): RequireTalentViewer,
    State(service): State<Arc<ModelProfileService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ModelProfileResponseDto>>> {
    let profile = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}
