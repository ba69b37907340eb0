use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::accounts::services::model_id_for_sub;
use crate::features::model_profiles::dtos::{
    ModelProfileQueryParams, ModelProfileResponseDto, UpdateModelProfileDto,
};
use crate::features::model_profiles::models::{ModelProfile, MODEL_PROFILE_COLUMNS};
use crate::shared::verification::{VerificationActor, VerificationStatus};

const LIST_FILTER: &str = r#"
    ($1::verification_status IS NULL OR verification_status = $1)
    AND ($2::text IS NULL OR location ILIKE '%' || $2 || '%')
    AND ($3::text IS NULL OR lower(gender) = lower($3))
    AND ($4::text IS NULL OR full_name ILIKE '%' || $4 || '%')
"#;

pub struct ModelProfileService {
    pool: PgPool,
}

impl ModelProfileService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_my(&self, sub: &str) -> Result<ModelProfileResponseDto> {
        let id = model_id_for_sub(&self.pool, sub).await?;
        self.get(id).await
    }

    pub async fn get(&self, id: Uuid) -> Result<ModelProfileResponseDto> {
        Ok(self.fetch(id).await?.into())
    }

    async fn fetch(&self, id: Uuid) -> Result<ModelProfile> {
        let sql = format!("SELECT {MODEL_PROFILE_COLUMNS} FROM model_profiles WHERE id = $1");
        sqlx::query_as::<_, ModelProfile>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "Model profile conflict"))?
            .ok_or_else(|| AppError::NotFound(format!("Model profile {} not found", id)))
    }

    pub async fn list(
        &self,
        params: &ModelProfileQueryParams,
    ) -> Result<(Vec<ModelProfileResponseDto>, i64)> {
        let count_sql = format!("SELECT COUNT(*) FROM model_profiles WHERE {LIST_FILTER}");
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(params.verification_status)
            .bind(params.location.as_deref())
            .bind(params.gender.as_deref())
            .bind(params.search.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count model profiles: {:?}", e);
                AppError::Database(e)
            })?;

        let sql = format!(
            r#"
            SELECT {MODEL_PROFILE_COLUMNS}
            FROM model_profiles
            WHERE {LIST_FILTER}
            ORDER BY created_at DESC
            LIMIT $5 OFFSET $6
            "#
        );
        let rows = sqlx::query_as::<_, ModelProfile>(&sql)
            .bind(params.verification_status)
            .bind(params.location.as_deref())
            .bind(params.gender.as_deref())
            .bind(params.search.as_deref())
            .bind(params.limit())
            .bind(params.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list model profiles: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    pub async fn update_my(
        &self,
        sub: &str,
        dto: UpdateModelProfileDto,
    ) -> Result<ModelProfileResponseDto> {
        let id = model_id_for_sub(&self.pool, sub).await?;

        let sql = format!(
            r#"
            UPDATE model_profiles SET
                full_name = COALESCE($2, full_name),
                gender = COALESCE($3, gender),
                date_of_birth = COALESCE($4, date_of_birth),
                height_cm = COALESCE($5, height_cm),
                weight_kg = COALESCE($6, weight_kg),
                eye_color = COALESCE($7, eye_color),
                hair_color = COALESCE($8, hair_color),
                location = COALESCE($9, location),
                bio = COALESCE($10, bio),
                experience_level = COALESCE($11, experience_level),
                instagram_handle = COALESCE($12, instagram_handle),
                phone = COALESCE($13, phone),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {MODEL_PROFILE_COLUMNS}
            "#
        );

        let profile = sqlx::query_as::<_, ModelProfile>(&sql)
            .bind(id)
            .bind(dto.full_name.as_deref().map(str::trim))
            .bind(dto.gender)
            .bind(dto.date_of_birth)
            .bind(dto.height_cm)
            .bind(dto.weight_kg)
            .bind(dto.eye_color)
            .bind(dto.hair_color)
            .bind(dto.location)
            .bind(dto.bio)
            .bind(dto.experience_level)
            .bind(dto.instagram_handle)
            .bind(dto.phone)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "Model profile conflict"))?;

        tracing::info!("Model profile updated: id={}", id);
        Ok(profile.into())
    }

    /// Owner asks for review: NotVerified -> Pending
    pub async fn request_verification(&self, sub: &str) -> Result<ModelProfileResponseDto> {
        let id = model_id_for_sub(&self.pool, sub).await?;
        self.change_verification(id, VerificationStatus::Pending, VerificationActor::Owner)
            .await
    }

    /// Admin decision on a profile's verification
    pub async fn set_verification(
        &self,
        id: Uuid,
        target: VerificationStatus,
        admin_sub: &str,
    ) -> Result<ModelProfileResponseDto> {
        let profile = self
            .change_verification(id, target, VerificationActor::Admin)
            .await?;
        tracing::info!(
            "Model profile {} verification set to {} by admin {}",
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
    ) -> Result<ModelProfileResponseDto> {
        let current = self.fetch(id).await?.verification_status;
        current.transition(target, actor)?;

        let sql = format!(
            r#"
            UPDATE model_profiles
            SET verification_status = $2, updated_at = NOW()
            WHERE id = $1 AND verification_status = $3
            RETURNING {MODEL_PROFILE_COLUMNS}
            "#
        );

        let profile = sqlx::query_as::<_, ModelProfile>(&sql)
            .bind(id)
            .bind(target)
            .bind(current)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "Model profile conflict"))?
            .ok_or_else(|| {
                AppError::Conflict("Verification status changed concurrently".to_string())
            })?;

        Ok(profile.into())
    }
}
