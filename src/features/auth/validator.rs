use super::model::{AuthenticatedUser, CustomClaims};
use crate::core::error::AppError;
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use super::jwks::JwksClient;

pub struct JwtValidator {
    jwks_client: Arc<JwksClient>,
    issuer: String,
    audience: String,
    leeway: u64,
    claims_namespace: String,
}

#[derive(Debug, Clone, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    email: Option<String>,

    // Remaining claims; the namespaced role claim is looked up here because
    // its key comes from configuration.
    #[serde(flatten)]
    extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    fn roles(&self, namespace: &str) -> Result<Vec<String>, AppError> {
        match self.extra.get(namespace) {
            Some(value) => serde_json::from_value::<CustomClaims>(value.clone())
                .map(|custom| custom.roles)
                .map_err(|e| AppError::Auth(format!("Malformed role claim: {}", e))),
            None => Ok(Vec::new()),
        }
    }
}

impl JwtValidator {
    pub fn new(
        jwks_client: Arc<JwksClient>,
        issuer: String,
        audience: String,
        leeway: Duration,
        claims_namespace: String,
    ) -> Self {
        Self {
            jwks_client,
            issuer,
            audience,
            leeway: leeway.as_secs(),
            claims_namespace,
        }
    }

    pub async fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let header = decode_header(token).map_err(|e| AppError::Auth(e.to_string()))?;

        if header.alg != Algorithm::RS256 {
            return Err(AppError::Auth(format!(
                "Unsupported algorithm: {:?}. Only RS256 is allowed",
                header.alg
            )));
        }

        let kid = header
            .kid
            .ok_or_else(|| AppError::Auth("Missing kid in token header".to_string()))?;

        let decoding_key = self
            .jwks_client
            .get_key(&kid)
            .await
            .map_err(|e| AppError::Auth(e.to_string()))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.leeway = self.leeway;
        validation.validate_nbf = true;

        let claims = decode::<Claims>(token, &decoding_key, &validation)
            .map_err(|e| AppError::Auth(e.to_string()))?
            .claims;

        let roles = claims.roles(&self.claims_namespace)?;

        Ok(AuthenticatedUser {
            sub: claims.sub,
            email: claims.email,
            roles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NAMESPACE: &str = "https://gigboard.app/claims";

    #[test]
    fn test_roles_read_from_namespaced_claim() {
        let claims: Claims = serde_json::from_value(json!({
            "sub": "user-1",
            "email": "jane@example.com",
            "iss": "https://id.example.com",
            NAMESPACE: { "roles": ["model"] }
        }))
        .unwrap();

        assert_eq!(claims.roles(NAMESPACE).unwrap(), vec!["model".to_string()]);
        assert_eq!(claims.email.as_deref(), Some("jane@example.com"));
    }

    #[test]
    fn test_missing_role_claim_means_no_roles() {
        let claims: Claims = serde_json::from_value(json!({ "sub": "user-2" })).unwrap();
        assert!(claims.roles(NAMESPACE).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_role_claim_is_rejected() {
        let claims: Claims =
            serde_json::from_value(json!({ "sub": "user-3", NAMESPACE: { "roles": "admin" } }))
                .unwrap();
        assert!(matches!(claims.roles(NAMESPACE), Err(AppError::Auth(_))));
    }
}
