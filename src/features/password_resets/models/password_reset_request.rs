use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::password_resets::dtos::PasswordResetResponseDto;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "reset_request_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ResetRequestStatus {
    Open,
    Resolved,
}

pub const RESET_REQUEST_COLUMNS: &str =
    "id, email, status, requested_at, resolved_at, resolved_by";

#[derive(Debug, Clone, FromRow)]
pub struct PasswordResetRequest {
    pub id: Uuid,
    pub email: String,
    pub status: ResetRequestStatus,
    pub requested_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub resolved_by: Option<String>,
}

impl From<PasswordResetRequest> for PasswordResetResponseDto {
    fn from(r: PasswordResetRequest) -> Self {
        Self {
            id: r.id,
            email: r.email,
            status: r.status,
            requested_at: r.requested_at,
            resolved_at: r.resolved_at,
            resolved_by: r.resolved_by,
        }
    }
}
