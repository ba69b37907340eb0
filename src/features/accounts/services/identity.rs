//! Resolve the caller's profile from the token subject.

use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::core::error::{AppError, Result};

#[derive(Debug, Clone, FromRow)]
pub struct BrandIdentity {
    pub id: Uuid,
    pub company_name: String,
}

pub async fn model_id_for_sub(pool: &PgPool, sub: &str) -> Result<Uuid> {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT mp.id
        FROM model_profiles mp
        JOIN users u ON u.id = mp.user_id
        WHERE u.sub = $1
        "#,
    )
    .bind(sub)
    .fetch_optional(pool)
    .await
    .map_err(|e| AppError::from_db(e, "Model profile conflict"))?
    .ok_or_else(|| {
        AppError::NotFound("Model profile not found. Complete onboarding first".to_string())
    })
}

pub async fn brand_for_sub(pool: &PgPool, sub: &str) -> Result<BrandIdentity> {
    sqlx::query_as::<_, BrandIdentity>(
        r#"
        SELECT bp.id, bp.company_name
        FROM brand_profiles bp
        JOIN users u ON u.id = bp.user_id
        WHERE u.sub = $1
        "#,
    )
    .bind(sub)
    .fetch_optional(pool)
    .await
    .map_err(|e| AppError::from_db(e, "Brand profile conflict"))?
    .ok_or_else(|| {
        AppError::NotFound("Brand profile not found. Complete onboarding first".to_string())
    })
}
