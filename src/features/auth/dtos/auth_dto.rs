use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::auth::model::AuthenticatedUser;

/// Token identity as seen by the API, before onboarding
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeResponseDto {
    pub sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub roles: Vec<String>,
}

impl From<AuthenticatedUser> for MeResponseDto {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            sub: user.sub,
            email: user.email,
            roles: user.roles,
        }
    }
}
