use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::shared::verification::VerificationStatus;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetVerificationDto {
    pub status: VerificationStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow, ToSchema)]
pub struct GigCountsDto {
    pub pending: i64,
    pub verified: i64,
    pub rejected: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ApplicationCountsDto {
    pub applied: i64,
    pub l1_approved: i64,
    pub l2_approved: i64,
    pub director_approved: i64,
    pub selected: i64,
    pub rejected: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PendingVerificationsDto {
    pub models: i64,
    pub brands: i64,
}

/// What needs an admin's attention
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct AdminOverviewDto {
    pub gigs: GigCountsDto,
    pub applications: ApplicationCountsDto,
    /// Profiles whose owners asked for verification
    pub pending_verifications: PendingVerificationsDto,
    pub open_password_resets: i64,
}
