use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::accounts::models::{Account, AccountRole};
use crate::shared::validation::validate_not_blank;

/// First-login request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct OnboardDto {
    /// Must be one of the roles carried by the token
    pub role: AccountRole,

    /// Falls back to the token's email claim
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    /// Model full name or brand company name
    #[validate(
        length(min = 1, max = 200, message = "Display name must be 1-200 characters"),
        custom(function = validate_not_blank)
    )]
    pub display_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccountResponseDto {
    pub id: Uuid,
    pub sub: String,
    pub email: String,
    pub role: AccountRole,
    /// Model or brand profile id; absent for admins
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponseDto {
    fn from(a: Account) -> Self {
        Self {
            id: a.id,
            sub: a.sub,
            email: a.email,
            role: a.role,
            profile_id: a.profile_id,
            created_at: a.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn onboard(display_name: &str) -> OnboardDto {
        OnboardDto {
            role: AccountRole::Brand,
            email: None,
            display_name: display_name.to_string(),
        }
    }

    #[test]
    fn test_display_name_must_not_be_blank() {
        assert!(onboard("Studio One").validate().is_ok());
        assert!(onboard("   ").validate().is_err());
        assert!(onboard("").validate().is_err());
    }
}
