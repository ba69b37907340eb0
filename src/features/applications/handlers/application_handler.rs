use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::applications::dtos::{
    ApplicantDto, ApplicationResponseDto, ModelApplicationDto, UpdateApplicationStatusDto,
};
use crate::features::applications::services::ApplicationService;
use crate::features::auth::guards::{RequireBrand, RequireModel};
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// Apply for a verified gig
#[utoipa::path(
    post,
    path = "/api/gigs/{id}/applications",
    params(("id" = Uuid, Path, description = "Gig ID")),
    responses(
        (status = 201, description = "Application submitted", body = ApiResponse<ApplicationResponseDto>),
        (status = 403, description = "Model access required"),
        (status = 404, description = "Gig not found or not open"),
        (status = 409, description = "Already applied")
    ),
    tag = "applications",
    security(("bearer_auth" = []))
)]
pub async fn apply_for_gig(
    RequireModel(user): RequireModel,
    State(service): State<Arc<ApplicationService>>,
    Path(gig_id): Path<Uuid>,
) -> Result<(StatusCode, Json<ApiResponse<ApplicationResponseDto>>)> {
    let application = service.apply(&user.sub, gig_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(application),
            Some("Application submitted".to_string()),
            None,
        )),
    ))
}

/// List applicants of one of the caller's gigs
#[utoipa::path(
    get,
    path = "/api/gigs/{id}/applications",
    params(("id" = Uuid, Path, description = "Gig ID"), PaginationQuery),
    responses(
        (status = 200, description = "Applicants retrieved", body = ApiResponse<Vec<ApplicantDto>>),
        (status = 403, description = "Not the posting brand"),
        (status = 404, description = "Gig not found")
    ),
    tag = "applications",
    security(("bearer_auth" = []))
)]
pub async fn list_applicants(
    RequireBrand(user): RequireBrand,
    State(service): State<Arc<ApplicationService>>,
    Path(gig_id): Path<Uuid>,
    AppQuery(page): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ApplicantDto>>>> {
    let (applicants, total) = service.applicants_by_gig(&user.sub, gig_id, &page).await?;
    Ok(Json(ApiResponse::success(
        Some(applicants),
        None,
        Some(Meta { total }),
    )))
}

/// Move an application to another review stage
#[utoipa::path(
    patch,
    path = "/api/applications/{id}/status",
    params(("id" = Uuid, Path, description = "Application ID")),
    request_body = UpdateApplicationStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<ApplicationResponseDto>),
        (status = 403, description = "Not the posting brand"),
        (status = 404, description = "Application not found"),
        (status = 409, description = "Transition not allowed or lost a race")
    ),
    tag = "applications",
    security(("bearer_auth" = []))
)]
pub async fn update_application_status(
    RequireBrand(user): RequireBrand,
    State(service): State<Arc<ApplicationService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateApplicationStatusDto>,
) -> Result<Json<ApiResponse<ApplicationResponseDto>>> {
    let application = service.update_status(&user.sub, id, dto.status).await?;
    Ok(Json(ApiResponse::success(Some(application), None, None)))
}

/// List the caller's own applications
#[utoipa::path(
    get,
    path = "/api/applications/me",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Applications retrieved", body = ApiResponse<Vec<ModelApplicationDto>>),
        (status = 403, description = "Model access required")
    ),
    tag = "applications",
    security(("bearer_auth" = []))
)]
pub async fn list_my_applications(
    RequireModel(user): RequireModel,
    State(service): State<Arc<ApplicationService>>,
    AppQuery(page): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ModelApplicationDto>>>> {
    let (applications, total) = service.applications_by_model(&user.sub, &page).await?;
    Ok(Json(ApiResponse::success(
        Some(applications),
        None,
        Some(Meta { total }),
    )))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    use crate::core::database::lazy_test_pool;
    use crate::features::applications::{routes, ApplicationService};
    use crate::features::auth::model::AuthenticatedUser;
    use crate::shared::test_helpers::{create_admin_user, create_brand_user, create_model_user, with_user};

    const GIG_ID: &str = "0193b8a4-5f6e-7000-8000-0000000000aa";

    fn server_as(user: AuthenticatedUser) -> TestServer {
        let service = Arc::new(ApplicationService::new(lazy_test_pool()));
        TestServer::new(with_user(routes::routes(service), user)).unwrap()
    }

    #[tokio::test]
    async fn test_brands_cannot_apply() {
        let response = server_as(create_brand_user())
            .post(&format!("/api/gigs/{}/applications", GIG_ID))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admins_do_not_act_as_brands() {
        let response = server_as(create_admin_user())
            .patch(&format!("/api/applications/{}/status", GIG_ID))
            .json(&json!({ "status": "selected" }))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_unknown_status_is_rejected() {
        let response = server_as(create_brand_user())
            .patch(&format!("/api/applications/{}/status", GIG_ID))
            .json(&json!({ "status": "shortlisted" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_models_cannot_see_applicants() {
        let response = server_as(create_model_user())
            .get(&format!("/api/gigs/{}/applications", GIG_ID))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
    }
}
