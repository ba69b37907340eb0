use axum::Json;

use crate::core::error::Result;
use crate::features::auth::dtos::MeResponseDto;
use crate::features::auth::model::AuthenticatedUser;
use crate::shared::types::ApiResponse;

/// Get the identity carried by the bearer token
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user retrieved successfully", body = ApiResponse<MeResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(user: AuthenticatedUser) -> Result<Json<ApiResponse<MeResponseDto>>> {
    Ok(Json(ApiResponse::success(Some(user.into()), None, None)))
}

#[cfg(test)]
mod tests {
    use crate::features::auth::routes;
    use crate::shared::test_helpers::{create_model_user, with_user};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::Value;

    #[tokio::test]
    async fn test_get_me_returns_token_identity() {
        let app = with_user(routes::protected_routes(), create_model_user());
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/auth/me").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["data"]["roles"][0], "model");
    }

    #[tokio::test]
    async fn test_get_me_without_user_is_unauthorized() {
        let server = TestServer::new(routes::protected_routes()).unwrap();

        let response = server.get("/api/auth/me").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}
