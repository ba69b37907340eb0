use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::admin::dtos::{AdminOverviewDto, SetVerificationDto};
use crate::features::admin::services::AdminService;
use crate::features::auth::guards::RequireAdmin;
use crate::features::brand_profiles::dtos::{BrandProfileQueryParams, BrandProfileResponseDto};
use crate::features::gigs::dtos::{GigQueryParams, GigResponseDto, ModerateGigDto};
use crate::features::model_profiles::dtos::{ModelProfileQueryParams, ModelProfileResponseDto};
use crate::shared::types::{ApiResponse, Meta};

#[utoipa::path(
    get,
    path = "/api/admin/overview",
    responses(
        (status = 200, description = "Marketplace counts", body = ApiResponse<AdminOverviewDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
pub async fn get_overview(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AdminService>>,
) -> Result<Json<ApiResponse<AdminOverviewDto>>> {
    let overview = service.overview().await?;
    Ok(Json(ApiResponse::success(Some(overview), None, None)))
}

/// List all gigs regardless of status (paginated)
#[utoipa::path(
    get,
    path = "/api/admin/gigs",
    params(GigQueryParams),
    responses(
        (status = 200, description = "List of gigs", body = ApiResponse<Vec<GigResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
pub async fn list_gigs(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    AppQuery(params): AppQuery<GigQueryParams>,
) -> Result<Json<ApiResponse<Vec<GigResponseDto>>>> {
    let (items, total) = service.list_gigs(&params).await?;
    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// Verify or reject a pending gig
#[utoipa::path(
    patch,
    path = "/api/admin/gigs/{id}/status",
    params(("id" = Uuid, Path, description = "Gig ID")),
    request_body = ModerateGigDto,
    responses(
        (status = 200, description = "Gig moderated", body = ApiResponse<GigResponseDto>),
        (status = 400, description = "Target status is not a moderation outcome"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "Gig not found"),
        (status = 409, description = "Gig was already moderated")
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
pub async fn moderate_gig(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<ModerateGigDto>,
) -> Result<Json<ApiResponse<GigResponseDto>>> {
    let gig = service.moderate_gig(&user.sub, id, dto.status).await?;
    Ok(Json(ApiResponse::success(Some(gig), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/admin/models",
    params(ModelProfileQueryParams),
    responses(
        (status = 200, description = "List of model profiles", body = ApiResponse<Vec<ModelProfileResponseDto>>),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
pub async fn list_models(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    AppQuery(params): AppQuery<ModelProfileQueryParams>,
) -> Result<Json<ApiResponse<Vec<ModelProfileResponseDto>>>> {
    let (items, total) = service.list_models(&params).await?;
    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

#[utoipa::path(
    patch,
    path = "/api/admin/models/{id}/verification",
    params(("id" = Uuid, Path, description = "Model profile ID")),
    request_body = SetVerificationDto,
    responses(
        (status = 200, description = "Verification updated", body = ApiResponse<ModelProfileResponseDto>),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "Profile not found"),
        (status = 409, description = "Transition not allowed from the current status")
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
pub async fn set_model_verification(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<SetVerificationDto>,
) -> Result<Json<ApiResponse<ModelProfileResponseDto>>> {
    let profile = service
        .set_model_verification(&user.sub, id, dto.status)
        .await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/admin/brands",
    params(BrandProfileQueryParams),
    responses(
        (status = 200, description = "List of brand profiles", body = ApiResponse<Vec<BrandProfileResponseDto>>),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
pub async fn list_brands(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    AppQuery(params): AppQuery<BrandProfileQueryParams>,
) -> Result<Json<ApiResponse<Vec<BrandProfileResponseDto>>>> {
    let (items, total) = service.list_brands(&params).await?;
    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

#[utoipa::path(
    patch,
    path = "/api/admin/brands/{id}/verification",
    params(("id" = Uuid, Path, description = "Brand profile ID")),
    request_body = SetVerificationDto,
    responses(
        (status = 200, description = "Verification updated", body = ApiResponse<BrandProfileResponseDto>),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "Profile not found"),
        (status = 409, description = "Transition not allowed from the current status")
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
pub async fn set_brand_verification(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<SetVerificationDto>,
) -> Result<Json<ApiResponse<BrandProfileResponseDto>>> {
    let profile = service
        .set_brand_verification(&user.sub, id, dto.status)
        .await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}
