use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireBrand;
use crate::features::saved_lists::dtos::{
    AddModelsDto, CreateSavedListDto, RenameSavedListDto, SavedListResponseDto,
};
use crate::features::saved_lists::services::SavedListService;
use crate::shared::types::{ApiResponse, Meta};

#[utoipa::path(
    post,
    path = "/api/saved-lists",
    request_body = CreateSavedListDto,
    responses(
        (status = 201, description = "List created", body = ApiResponse<SavedListResponseDto>),
        (status = 400, description = "Validation error or unknown model ids"),
        (status = 403, description = "Brand access required")
    ),
    tag = "saved-lists",
    security(("bearer_auth" = []))
)]
pub async fn create_list(
    RequireBrand(user): RequireBrand,
    State(service): State<Arc<SavedListService>>,
    AppJson(dto): AppJson<CreateSavedListDto>,
) -> Result<(StatusCode, Json<ApiResponse<SavedListResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let list = service.create(&user.sub, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(list), None, None)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/saved-lists",
    responses(
        (status = 200, description = "Lists retrieved", body = ApiResponse<Vec<SavedListResponseDto>>),
        (status = 403, description = "Brand access required")
    ),
    tag = "saved-lists",
    security(("bearer_auth" = []))
)]
pub async fn list_lists(
    RequireBrand(user): RequireBrand,
    State(service): State<Arc<SavedListService>>,
) -> Result<Json<ApiResponse<Vec<SavedListResponseDto>>>> {
    let lists = service.list(&user.sub).await?;
    let total = lists.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(lists),
        None,
        Some(Meta { total }),
    )))
}

#[utoipa::path(
    get,
    path = "/api/saved-lists/{id}",
    params(("id" = Uuid, Path, description = "Saved list ID")),
    responses(
        (status = 200, description = "List retrieved", body = ApiResponse<SavedListResponseDto>),
        (status = 404, description = "List not found")
    ),
    tag = "saved-lists",
    security(("bearer_auth" = []))
)]
pub async fn get_list(
    RequireBrand(user): RequireBrand,
    State(service): State<Arc<SavedListService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SavedListResponseDto>>> {
    let list = service.get(&user.sub, id).await?;
    Ok(Json(ApiResponse::success(Some(list), None, None)))
}

#[utoipa::path(
    patch,
    path = "/api/saved-lists/{id}",
    params(("id" = Uuid, Path, description = "Saved list ID")),
    request_body = RenameSavedListDto,
    responses(
        (status = 200, description = "List renamed", body = ApiResponse<SavedListResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "List not found")
    ),
    tag = "saved-lists",
    security(("bearer_auth" = []))
)]
pub async fn rename_list(
    RequireBrand(user): RequireBrand,
    State(service): State<Arc<SavedListService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<RenameSavedListDto>,
) -> Result<Json<ApiResponse<SavedListResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let list = service.rename(&user.sub, id, dto).await?;
    Ok(Json(ApiResponse::success(Some(list), None, None)))
}

#[utoipa::path(
    delete,
    path = "/api/saved-lists/{id}",
    params(("id" = Uuid, Path, description = "Saved list ID")),
    responses(
        (status = 200, description = "List deleted"),
        (status = 404, description = "List not found")
    ),
    tag = "saved-lists",
    security(("bearer_auth" = []))
)]
pub async fn delete_list(
    RequireBrand(user): RequireBrand,
    State(service): State<Arc<SavedListService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&user.sub, id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Saved list deleted".to_string()),
        None,
    )))
}

/// Add models to a list; ids already present are ignored
#[utoipa::path(
    post,
    path = "/api/saved-lists/{id}/models",
    params(("id" = Uuid, Path, description = "Saved list ID")),
    request_body = AddModelsDto,
    responses(
        (status = 200, description = "Models added", body = ApiResponse<SavedListResponseDto>),
        (status = 400, description = "Validation error or unknown model ids"),
        (status = 404, description = "List not found")
    ),
    tag = "saved-lists",
    security(("bearer_auth" = []))
)]
pub async fn add_models(
    RequireBrand(user): RequireBrand,
    State(service): State<Arc<SavedListService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<AddModelsDto>,
) -> Result<Json<ApiResponse<SavedListResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let list = service.add_models(&user.sub, id, dto).await?;
    Ok(Json(ApiResponse::success(Some(list), None, None)))
}

#[utoipa::path(
    delete,
    path = "/api/saved-lists/{id}/models/{model_id}",
    params(
        ("id" = Uuid, Path, description = "Saved list ID"),
        ("model_id" = Uuid, Path, description = "Model profile ID")
    ),
    responses(
        (status = 200, description = "Model removed", body = ApiResponse<SavedListResponseDto>),
        (status = 404, description = "List not found")
    ),
    tag = "saved-lists",
    security(("bearer_auth" = []))
)]
pub async fn remove_model(
    RequireBrand(user): RequireBrand,
    State(service): State<Arc<SavedListService>>,
    Path((id, model_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<SavedListResponseDto>>> {
    let list = service.remove_model(&user.sub, id, model_id).await?;
    Ok(Json(ApiResponse::success(Some(list), None, None)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    use crate::core::database::lazy_test_pool;
    use crate::features::auth::model::AuthenticatedUser;
    use crate::features::saved_lists::{routes, SavedListService};
    use crate::shared::test_helpers::{create_brand_user, create_model_user, with_user};

    fn server_as(user: AuthenticatedUser) -> TestServer {
        let service = Arc::new(SavedListService::new(lazy_test_pool()));
        TestServer::new(with_user(routes::routes(service), user)).unwrap()
    }

    #[tokio::test]
    async fn test_models_cannot_manage_lists() {
        let response = server_as(create_model_user()).get("/api/saved-lists").await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_blank_list_name_is_rejected() {
        let response = server_as(create_brand_user())
            .post("/api/saved-lists")
            .json(&json!({ "name": "" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_adding_nothing_is_rejected() {
        let response = server_as(create_brand_user())
            .post("/api/saved-lists/0193b8a4-5f6e-7000-8000-0000000000bb/models")
            .json(&json!({ "model_ids": [] }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
