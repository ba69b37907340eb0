use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::accounts::services::brand_for_sub;
use crate::features::brand_profiles::dtos::{
    BrandProfileQueryParams, BrandProfileResponseDto, UpdateBrandProfileDto,
};
use crate::features::brand_profiles::models::{BrandProfile, BRAND_PROFILE_COLUMNS};
use crate::shared::verification::{VerificationActor, VerificationStatus};

const LIST_FILTER: &str = r#"
    ($1::verification_status IS NULL OR verification_status = $1)
    AND ($2::text IS NULL OR company_name ILIKE '%' || $2 || '%')
"#;

pub struct BrandProfileService {
    pool: PgPool,
}

impl BrandProfileService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_my(&self, sub: &str) -> Result<BrandProfileResponseDto> {
        let brand = brand_for_sub(&self.pool, sub).await?;
        self.get(brand.id).await
    }

    pub async fn get(&self, id: Uuid) -> Result<BrandProfileResponseDto> {
        Ok(self.fetch(id).await?.into())
    }

    async fn fetch(&self, id: Uuid) -> Result<BrandProfile> {
        let sql = format!("SELECT {BRAND_PROFILE_COLUMNS} FROM brand_profiles WHERE id = $1");
        sqlx::query_as::<_, BrandProfile>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "Brand profile conflict"))?
            .ok_or_else(|| AppError::NotFound(format!("Brand profile {} not found", id)))
    }

    pub async fn list(
        &self,
        params: &BrandProfileQueryParams,
    ) -> Result<(Vec<BrandProfileResponseDto>, i64)> {
        let count_sql = format!("SELECT COUNT(*) FROM brand_profiles WHERE {LIST_FILTER}");
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(params.verification_status)
            .bind(params.search.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count brand profiles: {:?}", e);
                AppError::Database(e)
            })?;

        let sql = format!(
            r#"
            SELECT {BRAND_PROFILE_COLUMNS}
            FROM brand_profiles
            WHERE {LIST_FILTER}
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#
        );
        let rows = sqlx::query_as::<_, BrandProfile>(&sql)
            .bind(params.verification_status)
            .bind(params.search.as_deref())
            .bind(params.limit())
            .bind(params.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list brand profiles: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    pub async fn update_my(
        &self,
        sub: &str,
        dto: UpdateBrandProfileDto,
    ) -> Result<BrandProfileResponseDto> {
        let brand = brand_for_sub(&self.pool, sub).await?;

        let sql = format!(
            r#"
            UPDATE brand_profiles SET
                company_name = COALESCE($2, company_name),
                industry = COALESCE($3, industry),
                website = COALESCE($4, website),
                description = COALESCE($5, description),
                location = COALESCE($6, location),
                contact_name = COALESCE($7, contact_name),
                contact_phone = COALESCE($8, contact_phone),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {BRAND_PROFILE_COLUMNS}
            "#
        );

        let profile = sqlx::query_as::<_, BrandProfile>(&sql)
            .bind(brand.id)
            .bind(dto.company_name.as_deref().map(str::trim))
            .bind(dto.industry)
            .bind(dto.website)
            .bind(dto.description)
            .bind(dto.location)
            .bind(dto.contact_name)
            .bind(dto.contact_phone)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "Brand profile conflict"))?;

        // Gigs keep the name they were posted under
        tracing::info!("Brand profile updated: id={}", brand.id);
        Ok(profile.into())
    }

    pub async fn request_verification(&self, sub: &str) -> Result<BrandProfileResponseDto> {
        let brand = brand_for_sub(&self.pool, sub).await?;
        self.change_verification(brand.id, VerificationStatus::Pending, VerificationActor::Owner)
            .await
    }

    pub async fn set_verification(
        &self,
        id: Uuid,
        target: VerificationStatus,
        admin_sub: &str,
    ) -> Result<BrandProfileResponseDto> {
        let profile = self
            .change_verification(id, target, VerificationActor::Admin)
            .await?;
        tracing::info!(
            "Brand profile {} verification set to {} by admin {}",
            id,
            target,
            admin_sub
        );
        Ok(profile)
    }

    async fn change_verification(
        &self,
        id: Uuid,
        target: VerificationStatus,
        actor: VerificationActor,
    ) -> Result<BrandProfileResponseDto> {
        let current = self.fetch(id).await?.verification_status;
        current.transition(target, actor)?;

        let sql = format!(
            r#"
            UPDATE brand_profiles
            SET verification_status = $2, updated_at = NOW()
            WHERE id = $1 AND verification_status = $3
            RETURNING {BRAND_PROFILE_COLUMNS}
            "#
        );

        sqlx::query_as::<_, BrandProfile>(&sql)
            .bind(id)
            .bind(target)
            .bind(current)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "Brand profile conflict"))?
            .map(Into::into)
            .ok_or_else(|| {
                AppError::Conflict("Verification status changed concurrently".to_string())
            })
    }
}
