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
use crate::features::auth::guards::RequireBrand;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::gigs::dtos::{CreateGigDto, GigQueryParams, GigResponseDto, UpdateGigDto};
use crate::features::gigs::services::GigService;
use crate::shared::types::{ApiResponse, Meta};

/// Post a new gig; it stays Pending until an admin reviews it
#[utoipa::path(
    post,
    path = "/api/gigs",
    request_body = CreateGigDto,
    responses(
        (status = 201, description = "Gig created", body = ApiResponse<GigResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Brand access required"),
        (status = 404, description = "Brand profile not found")
    ),
    tag = "gigs",
    security(("bearer_auth" = []))
)]
pub async fn create_gig(
    RequireBrand(user): RequireBrand,
    State(service): State<Arc<GigService>>,
    AppJson(dto): AppJson<CreateGigDto>,
) -> Result<(StatusCode, Json<ApiResponse<GigResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let gig = service.create(&user.sub, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(gig),
            Some("Gig submitted for review".to_string()),
            None,
        )),
    ))
}

/// List gigs visible to the caller
#[utoipa::path(
    get,
    path = "/api/gigs",
    params(GigQueryParams),
    responses(
        (status = 200, description = "Gigs retrieved", body = ApiResponse<Vec<GigResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "No marketplace role")
    ),
    tag = "gigs",
    security(("bearer_auth" = []))
)]
pub async fn list_gigs(
    user: AuthenticatedUser,
    State(service): State<Arc<GigService>>,
    AppQuery(params): AppQuery<GigQueryParams>,
) -> Result<Json<ApiResponse<Vec<GigResponseDto>>>> {
    let viewer = service.viewer(&user).await?;
    let (gigs, total) = service.list(viewer, &params).await?;
    Ok(Json(ApiResponse::success(
        Some(gigs),
        None,
        Some(Meta { total }),
    )))
}

/// Get a gig by id
#[utoipa::path(
    get,
    path = "/api/gigs/{id}",
    params(("id" = Uuid, Path, description = "Gig ID")),
    responses(
        (status = 200, description = "Gig retrieved", body = ApiResponse<GigResponseDto>),
        (status = 404, description = "Gig not found or not visible")
    ),
    tag = "gigs",
    security(("bearer_auth" = []))
)]
pub async fn get_gig(
    user: AuthenticatedUser,
    State(service): State<Arc<GigService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<GigResponseDto>>> {
    let viewer = service.viewer(&user).await?;
    let gig = service.get(viewer, id).await?;
    Ok(Json(ApiResponse::success(Some(gig), None, None)))
}

/// Edit a gig's content while it is still Pending
#[utoipa::path(
    patch,
    path = "/api/gigs/{id}",
    params(("id" = Uuid, Path, description = "Gig ID")),
    request_body = UpdateGigDto,
    responses(
        (status = 200, description = "Gig updated", body = ApiResponse<GigResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Not the posting brand"),
        (status = 404, description = "Gig not found"),
        (status = 409, description = "Gig already moderated")
    ),
    tag = "gigs",
    security(("bearer_auth" = []))
)]
pub async fn update_gig(
    RequireBrand(user): RequireBrand,
    State(service): State<Arc<GigService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateGigDto>,
) -> Result<Json<ApiResponse<GigResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let gig = service.update(&user.sub, id, dto).await?;
    Ok(Json(ApiResponse::success(Some(gig), None, None)))
}

/// Delete a gig together with its applications
#[utoipa::path(
    delete,
    path = "/api/gigs/{id}",
    params(("id" = Uuid, Path, description = "Gig ID")),
    responses(
        (status = 200, description = "Gig deleted"),
        (status = 403, description = "Not the posting brand or an admin"),
        (status = 404, description = "Gig not found")
    ),
    tag = "gigs",
    security(("bearer_auth" = []))
)]
pub async fn delete_gig(
    user: AuthenticatedUser,
    State(service): State<Arc<GigService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    let viewer = service.viewer(&user).await?;
    service.delete(viewer, id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Gig deleted".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use crate::core::database::lazy_test_pool;
    use crate::features::auth::model::AuthenticatedUser;
    use crate::features::gigs::{routes, GigService};
    use crate::shared::test_helpers::{create_brand_user, create_model_user, with_user};

    fn server_as(user: AuthenticatedUser) -> TestServer {
        let service = Arc::new(GigService::new(lazy_test_pool()));
        TestServer::new(with_user(routes::routes(service), user)).unwrap()
    }

    fn gig_body() -> Value {
        json!({
            "title": "Summer lookbook",
            "description": "Outdoor shoot for the new collection",
            "location": "Bandung",
            "payment_type": "paid",
            "budget_min": "500",
            "budget_max": "1500"
        })
    }

    #[tokio::test]
    async fn test_models_cannot_post_gigs() {
        let response = server_as(create_model_user())
            .post("/api/gigs")
            .json(&gig_body())
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_inverted_budget_is_rejected() {
        let mut body = gig_body();
        body["budget_min"] = json!("2000");

        let response = server_as(create_brand_user())
            .post("/api/gigs")
            .json(&body)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_paid_gig_without_budget_is_rejected() {
        let response = server_as(create_brand_user())
            .post("/api/gigs")
            .json(&json!({
                "title": "Runway",
                "description": "Evening show",
                "location": "Jakarta",
                "payment_type": "paid"
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_payment_type_is_rejected() {
        let mut body = gig_body();
        body["payment_type"] = json!("invalid");

        let response = server_as(create_brand_user())
            .post("/api/gigs")
            .json(&body)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_users_without_role_cannot_list_gigs() {
        let mut user = create_model_user();
        user.roles.clear();

        let response = server_as(user).get("/api/gigs").await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_models_cannot_edit_gigs() {
        let response = server_as(create_model_user())
            .patch("/api/gigs/0193b8a4-5f6e-7000-8000-000000000001")
            .json(&json!({ "title": "New title" }))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
    }
}
