use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::password_resets::models::ResetRequestStatus;
use crate::shared::constants::MAX_PAGE_SIZE;
use crate::shared::types::{default_page, default_page_size};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePasswordResetDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PasswordResetResponseDto {
    pub id: Uuid,
    pub email: String,
    pub status: ResetRequestStatus,
    pub requested_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    /// Subject of the admin who resolved it
    pub resolved_by: Option<String>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PasswordResetQueryParams {
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,

    pub status: Option<ResetRequestStatus>,
}

impl PasswordResetQueryParams {
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit()
    }

    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}
