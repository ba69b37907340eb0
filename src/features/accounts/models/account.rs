use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::constants::{ROLE_ADMIN, ROLE_BRAND, ROLE_MODEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "account_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    Admin,
    Brand,
    Model,
}

impl AccountRole {
    /// Token role that grants this account role
    pub fn claim(&self) -> &'static str {
        match self {
            AccountRole::Admin => ROLE_ADMIN,
            AccountRole::Brand => ROLE_BRAND,
            AccountRole::Model => ROLE_MODEL,
        }
    }

    pub fn from_claim(claim: &str) -> Option<Self> {
        match claim.trim().to_ascii_lowercase().as_str() {
            ROLE_ADMIN => Some(AccountRole::Admin),
            ROLE_BRAND => Some(AccountRole::Brand),
            ROLE_MODEL => Some(AccountRole::Model),
            _ => None,
        }
    }
}

/// Row of `users` plus the id of the matching profile, if any
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub sub: String,
    pub email: String,
    pub role: AccountRole,
    pub profile_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_claim_roundtrip() {
        for role in [AccountRole::Admin, AccountRole::Brand, AccountRole::Model] {
            assert_eq!(AccountRole::from_claim(role.claim()), Some(role));
        }
        assert_eq!(AccountRole::from_claim(" Brand "), Some(AccountRole::Brand));
        assert_eq!(AccountRole::from_claim("director"), None);
    }
}
