use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::{ROLE_ADMIN, ROLE_BRAND, ROLE_MODEL};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Subject identifier issued by the identity provider
    pub sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    /// Check if user has a specific role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }

    pub fn is_brand(&self) -> bool {
        self.has_role(ROLE_BRAND)
    }

    pub fn is_model(&self) -> bool {
        self.has_role(ROLE_MODEL)
    }
}

/// Namespaced custom claim carrying marketplace roles
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomClaims {
    #[serde(default)]
    pub roles: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_checks() {
        let user = AuthenticatedUser {
            sub: "sub-1".to_string(),
            email: None,
            roles: vec![ROLE_BRAND.to_string()],
        };
        assert!(user.is_brand());
        assert!(!user.is_model());
        assert!(!user.is_admin());
    }
}
