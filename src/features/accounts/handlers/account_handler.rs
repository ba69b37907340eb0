use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::accounts::dtos::{AccountResponseDto, OnboardDto};
use crate::features::accounts::services::AccountService;
use crate::features::auth::model::AuthenticatedUser;
use crate::shared::types::ApiResponse;

/// Create the caller's account and empty profile on first login
#[utoipa::path(
    post,
    path = "/api/accounts/onboard",
    request_body = OnboardDto,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<AccountResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not granted by token"),
        (status = 409, description = "Account already onboarded")
    ),
    tag = "accounts",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn onboard(
    user: AuthenticatedUser,
    State(service): State<Arc<AccountService>>,
    AppJson(dto): AppJson<OnboardDto>,
) -> Result<(StatusCode, Json<ApiResponse<AccountResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let account = service.onboard(&user, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(account), None, None)),
    ))
}

/// Get the caller's account
#[utoipa::path(
    get,
    path = "/api/accounts/me",
    responses(
        (status = 200, description = "Account retrieved", body = ApiResponse<AccountResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Account not onboarded")
    ),
    tag = "accounts",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_my_account(
    user: AuthenticatedUser,
    State(service): State<Arc<AccountService>>,
) -> Result<Json<ApiResponse<AccountResponseDto>>> {
    let account = service.get_me(&user.sub).await?;
    Ok(Json(ApiResponse::success(Some(account), None, None)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    use crate::core::database::lazy_test_pool;
    use crate::features::accounts::{routes, AccountService};
    use crate::shared::test_helpers::{create_model_user, with_user};

    fn server() -> TestServer {
        let service = Arc::new(AccountService::new(lazy_test_pool()));
        TestServer::new(with_user(routes::routes(service), create_model_user())).unwrap()
    }

    #[tokio::test]
    async fn test_onboard_rejects_empty_display_name() {
        let response = server()
            .post("/api/accounts/onboard")
            .json(&json!({ "role": "model", "display_name": "" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_onboard_rejects_role_missing_from_token() {
        let response = server()
            .post("/api/accounts/onboard")
            .json(&json!({ "role": "brand", "display_name": "Acme Studio" }))
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_onboard_rejects_unknown_role() {
        let response = server()
            .post("/api/accounts/onboard")
            .json(&json!({ "role": "director", "display_name": "Jane" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
