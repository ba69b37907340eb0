//! Role-based authorization guards.
//!
//! Marketplace roles do not nest: an admin moderates but does not own
//! gigs or lists, so brand- and model-scoped routes check their own role.
//!
//! ```ignore
//! pub async fn handler(RequireBrand(user): RequireBrand) { ... }
//! ```

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

fn authenticated(parts: &Parts) -> Result<&AuthenticatedUser, AppError> {
    parts
        .extensions
        .get::<AuthenticatedUser>()
        .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))
}

macro_rules! role_guard {
    ($(#[$doc:meta])* $name:ident, $check:ident, $message:literal) => {
        $(#[$doc])*
        pub struct $name(pub AuthenticatedUser);

        impl<S> FromRequestParts<S> for $name
        where
            S: Send + Sync,
        {
            type Rejection = AppError;

            async fn from_request_parts(
                parts: &mut Parts,
                _state: &S,
            ) -> Result<Self, Self::Rejection> {
                let user = authenticated(parts)?;
                if !user.$check() {
                    return Err(AppError::Forbidden($message.to_string()));
                }
                Ok($name(user.clone()))
            }
        }
    };
}

role_guard!(
    /// Only users holding the `admin` role
    RequireAdmin,
    is_admin,
    "Admin access required"
);

role_guard!(
    /// Only users holding the `brand` role
    RequireBrand,
    is_brand,
    "Brand access required"
);

role_guard!(
    /// Only users holding the `model` role
    RequireModel,
    is_model,
    "Model access required"
);

/// Any authenticated user who can browse talent: brands and admins
pub struct RequireTalentViewer(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireTalentViewer
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = authenticated(parts)?;
        if !(user.is_brand() || user.is_admin()) {
            return Err(AppError::Forbidden(
                "Brand or admin access required".to_string(),
            ));
        }
        Ok(RequireTalentViewer(user.clone()))
    }
}
