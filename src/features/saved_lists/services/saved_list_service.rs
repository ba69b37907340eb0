use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::accounts::services::brand_for_sub;
use crate::features::saved_lists::dtos::{
    AddModelsDto, CreateSavedListDto, RenameSavedListDto, SavedListResponseDto,
};
use crate::features::saved_lists::models::{SavedList, SAVED_LIST_COLUMNS};
use crate::shared::validation::dedup_preserving_order;

pub struct SavedListService {
    pool: PgPool,
}

impl SavedListService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        brand_sub: &str,
        dto: CreateSavedListDto,
    ) -> Result<SavedListResponseDto> {
        let brand = brand_for_sub(&self.pool, brand_sub).await?;
        let model_ids = dedup_preserving_order(&dto.model_ids);
        self.ensure_models_exist(&model_ids).await?;

        let sql = format!(
            r#"
            INSERT INTO saved_lists (brand_id, name, model_ids)
            VALUES ($1, $2, $3)
            RETURNING {SAVED_LIST_COLUMNS}
            "#
        );

        let list = sqlx::query_as::<_, SavedList>(&sql)
            .bind(brand.id)
            .bind(dto.name.trim())
            .bind(&model_ids)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "Saved list conflict"))?;

        tracing::info!("Saved list created: id={}, brand_id={}", list.id, brand.id);
        Ok(list.into())
    }

    pub async fn list(&self, brand_sub: &str) -> Result<Vec<SavedListResponseDto>> {
        let brand = brand_for_sub(&self.pool, brand_sub).await?;

        let sql = format!(
            "SELECT {SAVED_LIST_COLUMNS} FROM saved_lists WHERE brand_id = $1 ORDER BY created_at DESC"
        );
        let lists = sqlx::query_as::<_, SavedList>(&sql)
            .bind(brand.id)
            .fetch_all(&self.pool)
            .await?;

        Ok(lists.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, brand_sub: &str, id: Uuid) -> Result<SavedListResponseDto> {
        let brand = brand_for_sub(&self.pool, brand_sub).await?;

        let sql = format!(
            "SELECT {SAVED_LIST_COLUMNS} FROM saved_lists WHERE id = $1 AND brand_id = $2"
        );
        sqlx::query_as::<_, SavedList>(&sql)
            .bind(id)
            .bind(brand.id)
            .fetch_optional(&self.pool)
            .await?
            .map(Into::into)
            .ok_or_else(|| list_not_found(id))
    }

    pub async fn rename(
        &self,
        brand_sub: &str,
        id: Uuid,
        dto: RenameSavedListDto,
    ) -> Result<SavedListResponseDto> {
        let brand = brand_for_sub(&self.pool, brand_sub).await?;

        let sql = format!(
            r#"
            UPDATE saved_lists SET name = $3, updated_at = NOW()
            WHERE id = $1 AND brand_id = $2
            RETURNING {SAVED_LIST_COLUMNS}
            "#
        );
        sqlx::query_as::<_, SavedList>(&sql)
            .bind(id)
            .bind(brand.id)
            .bind(dto.name.trim())
            .fetch_optional(&self.pool)
            .await?
            .map(Into::into)
            .ok_or_else(|| list_not_found(id))
    }

    pub async fn delete(&self, brand_sub: &str, id: Uuid) -> Result<()> {
        let brand = brand_for_sub(&self.pool, brand_sub).await?;

        let removed = sqlx::query("DELETE FROM saved_lists WHERE id = $1 AND brand_id = $2")
            .bind(id)
            .bind(brand.id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if removed == 0 {
            return Err(list_not_found(id));
        }

        tracing::info!("Saved list deleted: id={}", id);
        Ok(())
    }

    /// Append ids not yet on the list, in request order, in a single statement
    pub async fn add_models(
        &self,
        brand_sub: &str,
        id: Uuid,
        dto: AddModelsDto,
    ) -> Result<SavedListResponseDto> {
        let brand = brand_for_sub(&self.pool, brand_sub).await?;
        let model_ids = dedup_preserving_order(&dto.model_ids);
        self.ensure_models_exist(&model_ids).await?;

        let sql = format!(
            r#"
            UPDATE saved_lists
            SET model_ids = model_ids || ARRAY(
                    SELECT t.m
                    FROM unnest($3::uuid[]) WITH ORDINALITY AS t(m, ord)
                    WHERE NOT (t.m = ANY(model_ids))
                    ORDER BY t.ord
                ),
                updated_at = NOW()
            WHERE id = $1 AND brand_id = $2
            RETURNING {SAVED_LIST_COLUMNS}
            "#
        );

        let list = sqlx::query_as::<_, SavedList>(&sql)
            .bind(id)
            .bind(brand.id)
            .bind(&model_ids)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| list_not_found(id))?;

        tracing::debug!(
            "Saved list {} now holds {} models",
            list.id,
            list.model_ids.len()
        );
        Ok(list.into())
    }

    pub async fn remove_model(
        &self,
        brand_sub: &str,
        id: Uuid,
        model_id: Uuid,
    ) -> Result<SavedListResponseDto> {
        let brand = brand_for_sub(&self.pool, brand_sub).await?;

        let sql = format!(
            r#"
            UPDATE saved_lists
            SET model_ids = array_remove(model_ids, $3), updated_at = NOW()
            WHERE id = $1 AND brand_id = $2
            RETURNING {SAVED_LIST_COLUMNS}
            "#
        );

        sqlx::query_as::<_, SavedList>(&sql)
            .bind(id)
            .bind(brand.id)
            .bind(model_id)
            .fetch_optional(&self.pool)
            .await?
            .map(Into::into)
            .ok_or_else(|| list_not_found(id))
    }

    async fn ensure_models_exist(&self, ids: &[Uuid]) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }

        let found: Vec<Uuid> =
            sqlx::query_scalar("SELECT id FROM model_profiles WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&self.pool)
                .await?;

        let missing = missing_ids(ids, &found);
        if !missing.is_empty() {
            let listed: Vec<String> = missing.iter().map(Uuid::to_string).collect();
            return Err(AppError::BadRequest(format!(
                "Unknown model ids: {}",
                listed.join(", ")
            )));
        }
        Ok(())
    }
}

fn missing_ids(requested: &[Uuid], found: &[Uuid]) -> Vec<Uuid> {
    requested
        .iter()
        .filter(|id| !found.contains(id))
        .copied()
        .collect()
}

fn list_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Saved list {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};

    use crate::features::accounts::models::AccountRole;
    use crate::shared::constants::{ROLE_BRAND, ROLE_MODEL};
    use crate::shared::test_helpers::{onboard, user_with_sub};

    async fn models(pool: &PgPool, count: usize) -> Vec<Uuid> {
        let mut ids = Vec::with_capacity(count);
        for i in 0..count {
            let sub = format!("model-{}", i);
            let user = user_with_sub(&sub, ROLE_MODEL);
            ids.push(onboard(pool, &user, AccountRole::Model, &sub).await);
        }
        ids
    }

    async fn brand(pool: &PgPool, sub: &str) -> String {
        let user = user_with_sub(sub, ROLE_BRAND);
        onboard(pool, &user, AccountRole::Brand, sub).await;
        user.sub
    }

    fn named(name: &str, model_ids: Vec<Uuid>) -> CreateSavedListDto {
        CreateSavedListDto {
            name: name.to_string(),
            model_ids,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_add_models_appends_new_ids_in_request_order(pool: PgPool) {
        let m = models(&pool, 3).await;
        let owner = brand(&pool, "brand-a").await;
        let service = SavedListService::new(pool);

        let list = service
            .create(&owner, named("  Shortlist ", vec![m[0], m[0]]))
            .await
            .unwrap();
        assert_eq!(list.name, "Shortlist");
        assert_eq!(list.model_ids, vec![m[0]]);

        let add = AddModelsDto {
            model_ids: vec![m[2], m[0], m[1], m[2]],
        };
        let list = service.add_models(&owner, list.id, add).await.unwrap();
        assert_eq!(list.model_ids, vec![m[0], m[2], m[1]]);

        let again = AddModelsDto {
            model_ids: vec![m[1], m[0]],
        };
        let list = service.add_models(&owner, list.id, again).await.unwrap();
        assert_eq!(list.model_ids, vec![m[0], m[2], m[1]]);
        assert_eq!(list.model_count, 3);

        let list = service.remove_model(&owner, list.id, m[2]).await.unwrap();
        assert_eq!(list.model_ids, vec![m[0], m[1]]);
        assert_eq!(service.get(&owner, list.id).await.unwrap().model_ids, list.model_ids);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_concurrent_adds_do_not_duplicate(pool: PgPool) {
        let m = models(&pool, 1).await;
        let owner = brand(&pool, "brand-a").await;
        let service = SavedListService::new(pool);
        let list = service.create(&owner, named("Picks", vec![])).await.unwrap();

        let add = || AddModelsDto {
            model_ids: vec![m[0]],
        };
        let (first, second) = tokio::join!(
            service.add_models(&owner, list.id, add()),
            service.add_models(&owner, list.id, add()),
        );
        first.unwrap();
        second.unwrap();

        assert_eq!(service.get(&owner, list.id).await.unwrap().model_ids, vec![m[0]]);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_unknown_model_ids_are_rejected(pool: PgPool) {
        let m = models(&pool, 1).await;
        let owner = brand(&pool, "brand-a").await;
        let service = SavedListService::new(pool);
        let list = service.create(&owner, named("Picks", vec![m[0]])).await.unwrap();

        let add = AddModelsDto {
            model_ids: vec![Uuid::new_v4()],
        };
        assert!(matches!(
            service.add_models(&owner, list.id, add).await,
            Err(AppError::BadRequest(_))
        ));
        assert_eq!(service.get(&owner, list.id).await.unwrap().model_ids, vec![m[0]]);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_lists_are_private_to_their_brand(pool: PgPool) {
        let owner = brand(&pool, "brand-a").await;
        let rival = brand(&pool, "brand-b").await;
        let service = SavedListService::new(pool);
        let list = service.create(&owner, named("Picks", vec![])).await.unwrap();

        assert!(matches!(
            service.get(&rival, list.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.delete(&rival, list.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(service.list(&rival).await.unwrap().is_empty());

        let renamed = service
            .rename(
                &owner,
                list.id,
                RenameSavedListDto {
                    name: "Final picks".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.name, "Final picks");

        service.delete(&owner, list.id).await.unwrap();
        assert!(service.list(&owner).await.unwrap().is_empty());
    }

    #[test]
    fn test_missing_ids_keeps_request_order() {
        let ids: Vec<Uuid> = (0..5).map(|_| Faker.fake()).collect();
        let found = vec![ids[1], ids[3]];

        assert_eq!(missing_ids(&ids, &found), vec![ids[0], ids[2], ids[4]]);
        assert!(missing_ids(&ids, &ids).is_empty());
    }
}
