use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::accounts::services::brand_for_sub;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::gigs::dtos::{
    CreateGigDto, GigQueryParams, GigRequirements, GigResponseDto, UpdateGigDto,
};
use crate::features::gigs::models::{Gig, GigStatus, GIG_COLUMNS};
use crate::features::gigs::visibility::{Viewer, VISIBILITY_PREDICATE};

const LIST_FILTER: &str = r#"
    ($3::gig_status IS NULL OR g.status = $3)
    AND ($4::uuid IS NULL OR g.brand_id = $4)
    AND ($5::payment_type IS NULL OR g.payment_type = $5)
    AND ($6::text IS NULL OR g.location ILIKE '%' || $6 || '%')
    AND ($7::text IS NULL OR g.title ILIKE '%' || $7 || '%' OR g.description ILIKE '%' || $7 || '%')
"#;

pub struct GigService {
    pool: PgPool,
}

impl GigService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn viewer(&self, user: &AuthenticatedUser) -> Result<Viewer> {
        Viewer::resolve(user, || async {
            Ok(brand_for_sub(&self.pool, &user.sub).await?.id)
        })
        .await
    }

    /// Post a gig; it always starts Pending and carries the brand's current name
    pub async fn create(&self, brand_sub: &str, dto: CreateGigDto) -> Result<GigResponseDto> {
        let brand = brand_for_sub(&self.pool, brand_sub).await?;

        let sql = format!(
            r#"
            WITH g AS (
                INSERT INTO gigs (
                    brand_id, brand_name, title, description, location, gig_date, timing,
                    age_min, age_max, height_min_cm, height_max_cm,
                    experience_level, gender_preference, payment_type,
                    budget_min, budget_max, status
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
                RETURNING *
            )
            SELECT {GIG_COLUMNS} FROM g
            "#
        );

        let gig = sqlx::query_as::<_, Gig>(&sql)
            .bind(brand.id)
            .bind(&brand.company_name)
            .bind(dto.title.trim())
            .bind(&dto.description)
            .bind(dto.location.trim())
            .bind(dto.gig_date)
            .bind(&dto.timing)
            .bind(dto.age_min)
            .bind(dto.age_max)
            .bind(dto.height_min_cm)
            .bind(dto.height_max_cm)
            .bind(dto.experience_level)
            .bind(dto.gender_preference)
            .bind(dto.payment_type)
            .bind(dto.budget_min)
            .bind(dto.budget_max)
            .bind(GigStatus::Pending)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "Gig conflict"))?;

        tracing::info!("Gig created: id={}, brand_id={}", gig.id, brand.id);
        Ok(gig.into())
    }

    pub async fn get(&self, viewer: Viewer, id: Uuid) -> Result<GigResponseDto> {
        Ok(self.fetch_visible(viewer, id).await?.into())
    }

    pub async fn list(
        &self,
        viewer: Viewer,
        params: &GigQueryParams,
    ) -> Result<(Vec<GigResponseDto>, i64)> {
        let (sees_all, own_brand) = viewer.binds();
        let only_brand = if params.mine { viewer.brand_id() } else { None };

        let count_sql = format!(
            "SELECT COUNT(*) FROM gigs g WHERE {VISIBILITY_PREDICATE} AND {LIST_FILTER}"
        );
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(sees_all)
            .bind(own_brand)
            .bind(params.status)
            .bind(only_brand)
            .bind(params.payment_type)
            .bind(params.location.as_deref())
            .bind(params.search.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count gigs: {:?}", e);
                AppError::Database(e)
            })?;

        let sql = format!(
            r#"
            SELECT {GIG_COLUMNS}
            FROM gigs g
            WHERE {VISIBILITY_PREDICATE} AND {LIST_FILTER}
            ORDER BY g.created_at DESC
            LIMIT $8 OFFSET $9
            "#
        );
        let gigs = sqlx::query_as::<_, Gig>(&sql)
            .bind(sees_all)
            .bind(own_brand)
            .bind(params.status)
            .bind(only_brand)
            .bind(params.payment_type)
            .bind(params.location.as_deref())
            .bind(params.search.as_deref())
            .bind(params.limit())
            .bind(params.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list gigs: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((gigs.into_iter().map(Into::into).collect(), total))
    }

    /// Owner edits content while the gig awaits moderation
    pub async fn update(
        &self,
        brand_sub: &str,
        id: Uuid,
        dto: UpdateGigDto,
    ) -> Result<GigResponseDto> {
        let brand = brand_for_sub(&self.pool, brand_sub).await?;
        let gig = self.fetch_visible(Viewer::Brand(brand.id), id).await?;

        if gig.brand_id != brand.id {
            return Err(AppError::Forbidden(
                "Only the posting brand can edit this gig".to_string(),
            ));
        }
        if gig.status != GigStatus::Pending {
            return Err(AppError::Conflict(format!(
                "Gig is {} and can no longer be edited",
                gig.status.as_str()
            )));
        }

        GigRequirements::patched(&gig, &dto)
            .check()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let sql = format!(
            r#"
            WITH g AS (
                UPDATE gigs SET
                    title = COALESCE($3, title),
                    description = COALESCE($4, description),
                    location = COALESCE($5, location),
                    gig_date = COALESCE($6, gig_date),
                    timing = COALESCE($7, timing),
                    age_min = COALESCE($8, age_min),
                    age_max = COALESCE($9, age_max),
                    height_min_cm = COALESCE($10, height_min_cm),
                    height_max_cm = COALESCE($11, height_max_cm),
                    experience_level = COALESCE($12, experience_level),
                    gender_preference = COALESCE($13, gender_preference),
                    payment_type = COALESCE($14, payment_type),
                    budget_min = COALESCE($15, budget_min),
                    budget_max = COALESCE($16, budget_max),
                    updated_at = NOW()
                WHERE id = $1 AND status = $2
                RETURNING *
            )
            SELECT {GIG_COLUMNS} FROM g
            "#
        );

        let updated = sqlx::query_as::<_, Gig>(&sql)
            .bind(id)
            .bind(GigStatus::Pending)
            .bind(dto.title.as_deref().map(str::trim))
            .bind(dto.description)
            .bind(dto.location.as_deref().map(str::trim))
            .bind(dto.gig_date)
            .bind(dto.timing)
            .bind(dto.age_min)
            .bind(dto.age_max)
            .bind(dto.height_min_cm)
            .bind(dto.height_max_cm)
            .bind(dto.experience_level)
            .bind(dto.gender_preference)
            .bind(dto.payment_type)
            .bind(dto.budget_min)
            .bind(dto.budget_max)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "Gig conflict"))?
            .ok_or_else(|| {
                AppError::Conflict("Gig was moderated while being edited".to_string())
            })?;

        tracing::info!("Gig updated: id={}", id);
        Ok(updated.into())
    }

    /// Admin approval or rejection, applied only if nobody moved the gig first
    pub async fn moderate(
        &self,
        admin_sub: &str,
        id: Uuid,
        target: GigStatus,
    ) -> Result<GigResponseDto> {
        let gig = self.fetch_visible(Viewer::Admin, id).await?;
        gig.status.transition(target)?;

        let sql = format!(
            r#"
            WITH g AS (
                UPDATE gigs SET status = $2, updated_at = NOW()
                WHERE id = $1 AND status = $3
                RETURNING *
            )
            SELECT {GIG_COLUMNS} FROM g
            "#
        );

        let moderated = sqlx::query_as::<_, Gig>(&sql)
            .bind(id)
            .bind(target)
            .bind(gig.status)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "Gig conflict"))?
            .ok_or_else(|| AppError::Conflict("Gig was moderated concurrently".to_string()))?;

        tracing::info!(
            "Gig {} moved {} -> {} by admin {}",
            id,
            gig.status.as_str(),
            target.as_str(),
            admin_sub
        );
        Ok(moderated.into())
    }

    /// Remove a gig and every application to it atomically
    pub async fn delete(&self, viewer: Viewer, id: Uuid) -> Result<()> {
        let gig = self.fetch_visible(viewer, id).await?;

        let allowed = match viewer {
            Viewer::Admin => true,
            Viewer::Brand(own) => own == gig.brand_id,
            Viewer::Model => false,
        };
        if !allowed {
            return Err(AppError::Forbidden(
                "Only the posting brand or an admin can delete this gig".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let removed_applications = sqlx::query("DELETE FROM applications WHERE gig_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let removed = sqlx::query("DELETE FROM gigs WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if removed == 0 {
            return Err(gig_not_found(id));
        }

        tx.commit().await?;

        tracing::info!(
            "Gig deleted: id={}, applications_removed={}",
            id,
            removed_applications
        );
        Ok(())
    }

    async fn fetch_visible(&self, viewer: Viewer, id: Uuid) -> Result<Gig> {
        let (sees_all, own_brand) = viewer.binds();
        let sql = format!(
            "SELECT {GIG_COLUMNS} FROM gigs g WHERE {VISIBILITY_PREDICATE} AND g.id = $3"
        );

        sqlx::query_as::<_, Gig>(&sql)
            .bind(sees_all)
            .bind(own_brand)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "Gig conflict"))?
            .ok_or_else(|| gig_not_found(id))
    }
}

fn gig_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Gig {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use validator::Validate;

    use crate::features::accounts::models::AccountRole;
    use crate::features::applications::ApplicationService;
    use crate::features::gigs::models::{ExperienceLevel, GenderPreference, PaymentType};
    use crate::shared::constants::{ROLE_BRAND, ROLE_MODEL};
    use crate::shared::test_helpers::{onboard, user_with_sub};

    fn paid_gig(title: &str) -> CreateGigDto {
        CreateGigDto {
            title: title.to_string(),
            description: "Outdoor lookbook shoot".to_string(),
            location: "Jakarta".to_string(),
            gig_date: None,
            timing: None,
            age_min: Some(18),
            age_max: Some(30),
            height_min_cm: None,
            height_max_cm: None,
            experience_level: ExperienceLevel::Any,
            gender_preference: GenderPreference::Any,
            payment_type: PaymentType::Paid,
            budget_min: Some(Decimal::from(500)),
            budget_max: Some(Decimal::from(1500)),
        }
    }

    fn first_page() -> GigQueryParams {
        GigQueryParams {
            page: 1,
            page_size: 20,
            ..Default::default()
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_new_gig_is_pending_and_hidden_from_models(pool: PgPool) {
        let brand = user_with_sub("brand-a", ROLE_BRAND);
        let brand_id = onboard(&pool, &brand, AccountRole::Brand, "Studio A").await;
        let other = user_with_sub("brand-b", ROLE_BRAND);
        let other_id = onboard(&pool, &other, AccountRole::Brand, "Studio B").await;
        let service = GigService::new(pool);

        let gig = service.create(&brand.sub, paid_gig("Lookbook")).await.unwrap();
        assert_eq!(gig.status, GigStatus::Pending);
        assert_eq!(gig.brand_name, "Studio A");
        assert_eq!(gig.budget_max, Some(Decimal::from(1500)));

        assert!(service.get(Viewer::Brand(brand_id), gig.id).await.is_ok());
        assert!(service.get(Viewer::Admin, gig.id).await.is_ok());
        assert!(matches!(
            service.get(Viewer::Model, gig.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.get(Viewer::Brand(other_id), gig.id).await,
            Err(AppError::NotFound(_))
        ));

        let (model_view, total) = service.list(Viewer::Model, &first_page()).await.unwrap();
        assert!(model_view.is_empty());
        assert_eq!(total, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_verified_gigs_become_visible_to_models(pool: PgPool) {
        let brand = user_with_sub("brand-a", ROLE_BRAND);
        onboard(&pool, &brand, AccountRole::Brand, "Studio A").await;
        let service = GigService::new(pool);

        let shown = service.create(&brand.sub, paid_gig("Shown")).await.unwrap();
        let hidden = service.create(&brand.sub, paid_gig("Hidden")).await.unwrap();
        service
            .moderate("test-admin", shown.id, GigStatus::Verified)
            .await
            .unwrap();
        service
            .moderate("test-admin", hidden.id, GigStatus::Rejected)
            .await
            .unwrap();

        let (gigs, total) = service.list(Viewer::Model, &first_page()).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(gigs[0].id, shown.id);
        assert!(gigs.iter().all(|g| g.status == GigStatus::Verified));

        let (all, total) = service.list(Viewer::Admin, &first_page()).await.unwrap();
        assert_eq!(total, 2);
        assert_eq!(all.len(), 2);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_moderation_is_final_and_races_resolve_to_one_winner(pool: PgPool) {
        let brand = user_with_sub("brand-a", ROLE_BRAND);
        onboard(&pool, &brand, AccountRole::Brand, "Studio A").await;
        let service = GigService::new(pool);
        let gig = service.create(&brand.sub, paid_gig("Race")).await.unwrap();

        let (first, second) = tokio::join!(
            service.moderate("admin-1", gig.id, GigStatus::Verified),
            service.moderate("admin-2", gig.id, GigStatus::Verified),
        );
        let outcomes = [first, second];
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(outcomes
            .iter()
            .any(|r| matches!(r, Err(AppError::Conflict(_)))));

        assert!(matches!(
            service
                .moderate("admin-1", gig.id, GigStatus::Rejected)
                .await,
            Err(AppError::Conflict(_))
        ));
        assert!(matches!(
            service
                .update(&brand.sub, gig.id, UpdateGigDto::default())
                .await,
            Err(AppError::Conflict(_))
        ));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_budget_overflow_is_a_validation_error(pool: PgPool) {
        let brand = user_with_sub("brand-a", ROLE_BRAND);
        onboard(&pool, &brand, AccountRole::Brand, "Studio A").await;
        let service = GigService::new(pool);

        let mut dto = paid_gig("Too rich");
        dto.budget_max = Some(Decimal::from(100_000_000_000i64));
        assert!(dto.validate().is_err());

        // Reaching the column anyway maps to 400, not 500
        assert!(matches!(
            service.create(&brand.sub, dto).await,
            Err(AppError::Validation(_))
        ));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_pending_gig_can_be_edited_by_its_brand(pool: PgPool) {
        let brand = user_with_sub("brand-a", ROLE_BRAND);
        onboard(&pool, &brand, AccountRole::Brand, "Studio A").await;
        let service = GigService::new(pool);
        let gig = service.create(&brand.sub, paid_gig("Draft")).await.unwrap();

        let patch = UpdateGigDto {
            title: Some("  Final title ".to_string()),
            budget_max: Some(Decimal::from(2000)),
            ..Default::default()
        };
        let updated = service.update(&brand.sub, gig.id, patch).await.unwrap();
        assert_eq!(updated.title, "Final title");
        assert_eq!(updated.budget_max, Some(Decimal::from(2000)));
        assert_eq!(updated.location, "Jakarta");

        // Patch against the stored minimum of 500
        let inverted = UpdateGigDto {
            budget_max: Some(Decimal::from(100)),
            ..Default::default()
        };
        assert!(matches!(
            service.update(&brand.sub, gig.id, inverted).await,
            Err(AppError::Validation(_))
        ));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_delete_removes_gig_and_its_applications(pool: PgPool) {
        let brand = user_with_sub("brand-a", ROLE_BRAND);
        let brand_id = onboard(&pool, &brand, AccountRole::Brand, "Studio A").await;
        let service = GigService::new(pool.clone());
        let applications = ApplicationService::new(pool.clone());

        let gig = service.create(&brand.sub, paid_gig("Doomed")).await.unwrap();
        service
            .moderate("test-admin", gig.id, GigStatus::Verified)
            .await
            .unwrap();
        for sub in ["model-1", "model-2"] {
            let model = user_with_sub(sub, ROLE_MODEL);
            onboard(&pool, &model, AccountRole::Model, sub).await;
            applications.apply(&model.sub, gig.id).await.unwrap();
        }

        assert!(matches!(
            service.delete(Viewer::Model, gig.id).await,
            Err(AppError::Forbidden(_))
        ));
        service.delete(Viewer::Brand(brand_id), gig.id).await.unwrap();

        let left: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM applications WHERE gig_id = $1")
            .bind(gig.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(left, 0);
        assert!(matches!(
            service.get(Viewer::Admin, gig.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
