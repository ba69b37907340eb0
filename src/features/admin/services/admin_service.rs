use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::admin::dtos::{
    AdminOverviewDto, ApplicationCountsDto, GigCountsDto, PendingVerificationsDto,
};
use crate::features::brand_profiles::dtos::{BrandProfileQueryParams, BrandProfileResponseDto};
use crate::features::brand_profiles::BrandProfileService;
use crate::features::gigs::dtos::{GigQueryParams, GigResponseDto};
use crate::features::gigs::models::GigStatus;
use crate::features::gigs::visibility::Viewer;
use crate::features::gigs::GigService;
use crate::features::model_profiles::dtos::{ModelProfileQueryParams, ModelProfileResponseDto};
use crate::features::model_profiles::ModelProfileService;
use crate::shared::verification::VerificationStatus;

/// Admin entry points over the marketplace services, plus dashboard counts
pub struct AdminService {
    pool: PgPool,
    gigs: Arc<GigService>,
    models: Arc<ModelProfileService>,
    brands: Arc<BrandProfileService>,
}

impl AdminService {
    pub fn new(
        pool: PgPool,
        gigs: Arc<GigService>,
        models: Arc<ModelProfileService>,
        brands: Arc<BrandProfileService>,
    ) -> Self {
        Self {
            pool,
            gigs,
            models,
            brands,
        }
    }

    // =========================================================================
    // GIGS
    // =========================================================================

    pub async fn list_gigs(&self, params: &GigQueryParams) -> Result<(Vec<GigResponseDto>, i64)> {
        self.gigs.list(Viewer::Admin, params).await
    }

    pub async fn moderate_gig(
        &self,
        admin_sub: &str,
        id: Uuid,
        target: GigStatus,
    ) -> Result<GigResponseDto> {
        if target == GigStatus::Pending {
            return Err(AppError::BadRequest(
                "Moderation sets a gig to 'verified' or 'rejected'".to_string(),
            ));
        }
        self.gigs.moderate(admin_sub, id, target).await
    }

    // =========================================================================
    // PROFILES
    // =========================================================================

    pub async fn list_models(
        &self,
        params: &ModelProfileQueryParams,
    ) -> Result<(Vec<ModelProfileResponseDto>, i64)> {
        self.models.list(params).await
    }

    pub async fn set_model_verification(
        &self,
        admin_sub: &str,
        id: Uuid,
        target: VerificationStatus,
    ) -> Result<ModelProfileResponseDto> {
        self.models.set_verification(id, target, admin_sub).await
    }

    pub async fn list_brands(
        &self,
        params: &BrandProfileQueryParams,
    ) -> Result<(Vec<BrandProfileResponseDto>, i64)> {
        self.brands.list(params).await
    }

    pub async fn set_brand_verification(
        &self,
        admin_sub: &str,
        id: Uuid,
        target: VerificationStatus,
    ) -> Result<BrandProfileResponseDto> {
        self.brands.set_verification(id, target, admin_sub).await
    }

    // =========================================================================
    // OVERVIEW
    // =========================================================================

    pub async fn overview(&self) -> Result<AdminOverviewDto> {
        let gigs = sqlx::query_as::<_, GigCountsDto>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                COUNT(*) FILTER (WHERE status = 'verified') AS verified,
                COUNT(*) FILTER (WHERE status = 'rejected') AS rejected
            FROM gigs
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count gigs: {:?}", e);
            AppError::Database(e)
        })?;

        let applications = sqlx::query_as::<_, ApplicationCountsDto>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE status = 'applied') AS applied,
                COUNT(*) FILTER (WHERE status = 'l1_approved') AS l1_approved,
                COUNT(*) FILTER (WHERE status = 'l2_approved') AS l2_approved,
                COUNT(*) FILTER (WHERE status = 'director_approved') AS director_approved,
                COUNT(*) FILTER (WHERE status = 'selected') AS selected,
                COUNT(*) FILTER (WHERE status = 'rejected') AS rejected
            FROM applications
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count applications: {:?}", e);
            AppError::Database(e)
        })?;

        let pending_verifications = sqlx::query_as::<_, PendingVerificationsDto>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM model_profiles WHERE verification_status = 'pending') AS models,
                (SELECT COUNT(*) FROM brand_profiles WHERE verification_status = 'pending') AS brands
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count pending verifications: {:?}", e);
            AppError::Database(e)
        })?;

        let open_password_resets: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM password_reset_requests WHERE status = 'open'",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count password reset requests: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(AdminOverviewDto {
            gigs,
            applications,
            pending_verifications,
            open_password_resets,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::lazy_test_pool;

    fn service() -> AdminService {
        let pool = lazy_test_pool();
        AdminService::new(
            pool.clone(),
            Arc::new(GigService::new(pool.clone())),
            Arc::new(ModelProfileService::new(pool.clone())),
            Arc::new(BrandProfileService::new(pool)),
        )
    }

    #[tokio::test]
    async fn test_moderation_cannot_reopen_a_gig() {
        let result = service()
            .moderate_gig("test-admin", Uuid::new_v4(), GigStatus::Pending)
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
