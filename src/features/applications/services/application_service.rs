use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::accounts::services::{brand_for_sub, model_id_for_sub};
use crate::features::applications::dtos::{
    ApplicantDto, ApplicationResponseDto, ModelApplicationDto,
};
use crate::features::applications::models::{
    Applicant, Application, ApplicationStatus, ModelApplication, APPLICATION_COLUMNS,
};
use crate::features::gigs::models::GigStatus;
use crate::shared::types::PaginationQuery;

const ALREADY_APPLIED: &str = "You have already applied to this gig";

pub struct ApplicationService {
    pool: PgPool,
}

impl ApplicationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply to a Verified gig; the (gig, model) unique constraint makes
    /// concurrent double submissions collapse to one row.
    pub async fn apply(&self, model_sub: &str, gig_id: Uuid) -> Result<ApplicationResponseDto> {
        let model_id = model_id_for_sub(&self.pool, model_sub).await?;

        let status: Option<GigStatus> =
            sqlx::query_scalar("SELECT status FROM gigs WHERE id = $1")
                .bind(gig_id)
                .fetch_optional(&self.pool)
                .await?;

        // Unverified gigs are invisible to models
        if status != Some(GigStatus::Verified) {
            return Err(AppError::NotFound(format!("Gig {} not found", gig_id)));
        }

        let sql = format!(
            r#"
            WITH a AS (
                INSERT INTO applications (gig_id, model_id, status, applied_at, updated_at)
                VALUES ($1, $2, $3, NOW(), NOW())
                RETURNING *
            )
            SELECT {APPLICATION_COLUMNS} FROM a
            "#
        );

        let application = sqlx::query_as::<_, Application>(&sql)
            .bind(gig_id)
            .bind(model_id)
            .bind(ApplicationStatus::Applied)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, ALREADY_APPLIED))?;

        tracing::info!(
            "Application created: id={}, gig_id={}, model_id={}",
            application.id,
            gig_id,
            model_id
        );
        Ok(application.into())
    }

    /// Move an applicant to a new stage; only the gig's brand may do this
    pub async fn update_status(
        &self,
        brand_sub: &str,
        application_id: Uuid,
        target: ApplicationStatus,
    ) -> Result<ApplicationResponseDto> {
        let brand = brand_for_sub(&self.pool, brand_sub).await?;

        let row: Option<(ApplicationStatus, Uuid)> = sqlx::query_as(
            r#"
            SELECT a.status, g.brand_id
            FROM applications a
            JOIN gigs g ON g.id = a.gig_id
            WHERE a.id = $1
            "#,
        )
        .bind(application_id)
        .fetch_optional(&self.pool)
        .await?;

        let (current, owner) = row.ok_or_else(|| {
            AppError::NotFound(format!("Application {} not found", application_id))
        })?;

        if owner != brand.id {
            return Err(AppError::Forbidden(
                "Only the posting brand can review this application".to_string(),
            ));
        }

        current.transition(target)?;

        let sql = format!(
            r#"
            WITH a AS (
                UPDATE applications SET status = $2, updated_at = NOW()
                WHERE id = $1 AND status = $3
                RETURNING *
            )
            SELECT {APPLICATION_COLUMNS} FROM a
            "#
        );

        let application = sqlx::query_as::<_, Application>(&sql)
            .bind(application_id)
            .bind(target)
            .bind(current)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::Conflict("Application status changed concurrently".to_string())
            })?;

        tracing::info!(
            "Application {} moved {} -> {} by brand {}",
            application_id,
            current.as_str(),
            target.as_str(),
            brand.id
        );
        Ok(application.into())
    }

    pub async fn applicants_by_gig(
        &self,
        brand_sub: &str,
        gig_id: Uuid,
        page: &PaginationQuery,
    ) -> Result<(Vec<ApplicantDto>, i64)> {
        let brand = brand_for_sub(&self.pool, brand_sub).await?;

        let owner: Option<Uuid> = sqlx::query_scalar("SELECT brand_id FROM gigs WHERE id = $1")
            .bind(gig_id)
            .fetch_optional(&self.pool)
            .await?;

        match owner {
            None => return Err(AppError::NotFound(format!("Gig {} not found", gig_id))),
            Some(owner) if owner != brand.id => {
                return Err(AppError::Forbidden(
                    "Only the posting brand can view applicants".to_string(),
                ))
            }
            Some(_) => {}
        }

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM applications WHERE gig_id = $1")
            .bind(gig_id)
            .fetch_one(&self.pool)
            .await?;

        let sql = format!(
            r#"
            SELECT {APPLICATION_COLUMNS},
                   m.full_name, m.location, m.height_cm, m.profile_image_url,
                   m.verification_status
            FROM applications a
            JOIN model_profiles m ON m.id = a.model_id
            WHERE a.gig_id = $1
            ORDER BY a.applied_at ASC
            LIMIT $2 OFFSET $3
            "#
        );

        let applicants = sqlx::query_as::<_, Applicant>(&sql)
            .bind(gig_id)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list applicants: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((applicants.into_iter().map(Into::into).collect(), total))
    }

    pub async fn applications_by_model(
        &self,
        model_sub: &str,
        page: &PaginationQuery,
    ) -> Result<(Vec<ModelApplicationDto>, i64)> {
        let model_id = model_id_for_sub(&self.pool, model_sub).await?;

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM applications WHERE model_id = $1")
                .bind(model_id)
                .fetch_one(&self.pool)
                .await?;

        let sql = format!(
            r#"
            SELECT {APPLICATION_COLUMNS},
                   g.title AS gig_title, g.brand_name, g.location AS gig_location,
                   g.gig_date, g.status AS gig_status
            FROM applications a
            JOIN gigs g ON g.id = a.gig_id
            WHERE a.model_id = $1
            ORDER BY a.applied_at DESC
            LIMIT $2 OFFSET $3
            "#
        );

        let applications = sqlx::query_as::<_, ModelApplication>(&sql)
            .bind(model_id)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list model applications: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((applications.into_iter().map(Into::into).collect(), total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    use crate::features::accounts::models::AccountRole;
    use crate::features::auth::model::AuthenticatedUser;
    use crate::features::gigs::dtos::{CreateGigDto, GigResponseDto};
    use crate::features::gigs::models::{ExperienceLevel, GenderPreference, PaymentType};
    use crate::features::gigs::GigService;
    use crate::shared::constants::{ROLE_BRAND, ROLE_MODEL};
    use crate::shared::test_helpers::{onboard, user_with_sub};

    fn first_page() -> PaginationQuery {
        PaginationQuery {
            page: 1,
            page_size: 20,
        }
    }

    fn paid_gig() -> CreateGigDto {
        CreateGigDto {
            title: "Summer campaign".to_string(),
            description: "Beachwear catalogue".to_string(),
            location: "Bali".to_string(),
            gig_date: None,
            timing: Some("09:00-17:00".to_string()),
            age_min: None,
            age_max: None,
            height_min_cm: None,
            height_max_cm: None,
            experience_level: ExperienceLevel::Any,
            gender_preference: GenderPreference::Any,
            payment_type: PaymentType::Paid,
            budget_min: Some(Decimal::from(500)),
            budget_max: Some(Decimal::from(1500)),
        }
    }

    struct Market {
        brand: AuthenticatedUser,
        model: AuthenticatedUser,
        gigs: GigService,
        applications: ApplicationService,
    }

    async fn market(pool: &PgPool) -> Market {
        let brand = user_with_sub("brand-a", ROLE_BRAND);
        onboard(pool, &brand, AccountRole::Brand, "Studio A").await;
        let model = user_with_sub("model-a", ROLE_MODEL);
        onboard(pool, &model, AccountRole::Model, "Ana").await;

        Market {
            brand,
            model,
            gigs: GigService::new(pool.clone()),
            applications: ApplicationService::new(pool.clone()),
        }
    }

    async fn verified_gig(m: &Market) -> GigResponseDto {
        let gig = m.gigs.create(&m.brand.sub, paid_gig()).await.unwrap();
        m.gigs
            .moderate("test-admin", gig.id, GigStatus::Verified)
            .await
            .unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_brand_to_selection_scenario(pool: PgPool) {
        let m = market(&pool).await;

        let gig = m.gigs.create(&m.brand.sub, paid_gig()).await.unwrap();
        assert_eq!(gig.status, GigStatus::Pending);
        assert!(matches!(
            m.applications.apply(&m.model.sub, gig.id).await,
            Err(AppError::NotFound(_))
        ));

        let gig = m
            .gigs
            .moderate("test-admin", gig.id, GigStatus::Verified)
            .await
            .unwrap();
        assert_eq!(gig.status, GigStatus::Verified);

        let application = m.applications.apply(&m.model.sub, gig.id).await.unwrap();
        assert_eq!(application.status, ApplicationStatus::Applied);
        assert_eq!(application.gig_id, gig.id);

        let selected = m
            .applications
            .update_status(&m.brand.sub, application.id, ApplicationStatus::Selected)
            .await
            .unwrap();
        assert_eq!(selected.status, ApplicationStatus::Selected);

        let (applicants, total) = m
            .applications
            .applicants_by_gig(&m.brand.sub, gig.id, &first_page())
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(applicants[0].status, ApplicationStatus::Selected);
        assert_eq!(applicants[0].model.full_name, "Ana");

        let (mine, _) = m
            .applications
            .applications_by_model(&m.model.sub, &first_page())
            .await
            .unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].gig.brand_name, "Studio A");
        assert_eq!(mine[0].status, ApplicationStatus::Selected);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_second_apply_is_a_conflict(pool: PgPool) {
        let m = market(&pool).await;
        let gig = verified_gig(&m).await;

        m.applications.apply(&m.model.sub, gig.id).await.unwrap();
        let again = m.applications.apply(&m.model.sub, gig.id).await;

        match again {
            Err(AppError::Conflict(message)) => assert_eq!(message, ALREADY_APPLIED),
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_concurrent_applies_leave_one_row(pool: PgPool) {
        let m = market(&pool).await;
        let gig = verified_gig(&m).await;

        let (first, second) = tokio::join!(
            m.applications.apply(&m.model.sub, gig.id),
            m.applications.apply(&m.model.sub, gig.id),
        );
        assert_eq!([first.is_ok(), second.is_ok()].iter().filter(|ok| **ok).count(), 1);

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM applications WHERE gig_id = $1")
            .bind(gig.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_funnel_moves_forward_only(pool: PgPool) {
        let m = market(&pool).await;
        let gig = verified_gig(&m).await;
        let application = m.applications.apply(&m.model.sub, gig.id).await.unwrap();

        m.applications
            .update_status(&m.brand.sub, application.id, ApplicationStatus::L2Approved)
            .await
            .unwrap();
        assert!(matches!(
            m.applications
                .update_status(&m.brand.sub, application.id, ApplicationStatus::L1Approved)
                .await,
            Err(AppError::Conflict(_))
        ));

        m.applications
            .update_status(&m.brand.sub, application.id, ApplicationStatus::Rejected)
            .await
            .unwrap();
        assert!(matches!(
            m.applications
                .update_status(&m.brand.sub, application.id, ApplicationStatus::Selected)
                .await,
            Err(AppError::Conflict(_))
        ));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_concurrent_status_updates_have_one_winner(pool: PgPool) {
        let m = market(&pool).await;
        let gig = verified_gig(&m).await;
        let application = m.applications.apply(&m.model.sub, gig.id).await.unwrap();

        let (first, second) = tokio::join!(
            m.applications
                .update_status(&m.brand.sub, application.id, ApplicationStatus::Selected),
            m.applications
                .update_status(&m.brand.sub, application.id, ApplicationStatus::Selected),
        );
        let outcomes = [first, second];
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(outcomes
            .iter()
            .any(|r| matches!(r, Err(AppError::Conflict(_)))));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_only_the_posting_brand_reviews_applicants(pool: PgPool) {
        let m = market(&pool).await;
        let gig = verified_gig(&m).await;
        let application = m.applications.apply(&m.model.sub, gig.id).await.unwrap();

        let rival = user_with_sub("brand-b", ROLE_BRAND);
        onboard(&pool, &rival, AccountRole::Brand, "Studio B").await;

        assert!(matches!(
            m.applications
                .update_status(&rival.sub, application.id, ApplicationStatus::Selected)
                .await,
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            m.applications
                .applicants_by_gig(&rival.sub, gig.id, &first_page())
                .await,
            Err(AppError::Forbidden(_))
        ));
    }
}
