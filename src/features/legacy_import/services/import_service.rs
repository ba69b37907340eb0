use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::accounts::models::AccountRole;
use crate::features::legacy_import::dtos::{ImportCountsDto, ImportReportDto, ImportRowErrorDto};
use crate::features::legacy_import::models::{
    parse_rows, LegacyModelRow, LegacyUserRow, ParsedRows,
};

pub const USERS_FILE: &str = "users";
pub const MODELS_FILE: &str = "models";

pub struct ImportService {
    pool: PgPool,
}

impl ImportService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Import both files in one transaction; row problems are reported, not raised
    pub async fn import(
        &self,
        admin_sub: &str,
        users_csv: Option<Vec<u8>>,
        models_csv: Option<Vec<u8>>,
    ) -> Result<ImportReportDto> {
        if users_csv.is_none() && models_csv.is_none() {
            return Err(AppError::BadRequest(
                "Upload a 'users' and/or 'models' CSV file".to_string(),
            ));
        }

        let users = users_csv
            .map(|data| parse_rows::<LegacyUserRow>(&data, USERS_FILE, |row| row))
            .unwrap_or_else(empty);
        let models = models_csv
            .map(|data| parse_rows::<LegacyModelRow>(&data, MODELS_FILE, LegacyModelRow::normalize))
            .unwrap_or_else(empty);

        let mut report = ImportReportDto::default();
        report.errors.extend(users.errors);
        report.errors.extend(models.errors);

        let mut tx = self.pool.begin().await?;

        let mut new_model_users = Vec::new();
        for (_, row) in &users.rows {
            match insert_user(&mut tx, row).await? {
                Some((user_id, AccountRole::Model)) => {
                    new_model_users.push(user_id);
                    report.users.imported += 1;
                }
                Some(_) => report.users.imported += 1,
                None => report.users.skipped += 1,
            }
        }

        for (line, row) in &models.rows {
            match insert_model_profile(&mut tx, row).await? {
                ModelOutcome::Imported => report.models.imported += 1,
                ModelOutcome::AlreadyExists => report.models.skipped += 1,
                ModelOutcome::UnknownAccount => report.errors.push(ImportRowErrorDto {
                    file: MODELS_FILE.to_string(),
                    line: *line,
                    message: format!("No model account with sub '{}'", row.sub),
                }),
            }
        }

        // Model accounts the models file did not cover still need a profile
        sqlx::query(
            r#"
            INSERT INTO model_profiles (user_id, full_name)
            SELECT u.id, split_part(u.email, '@', 1)
            FROM users u
            WHERE u.id = ANY($1)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(&new_model_users)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::from_db(e, "Model profile already exists"))?;

        tx.commit().await?;

        report.errors.sort_by(|a, b| (&a.file, a.line).cmp(&(&b.file, b.line)));

        tracing::info!(
            "Legacy import by admin {}: users {}/{} skipped, models {}/{} skipped, {} row errors",
            admin_sub,
            report.users.imported,
            report.users.skipped,
            report.models.imported,
            report.models.skipped,
            report.errors.len()
        );

        Ok(report)
    }
}

fn empty<T>() -> ParsedRows<T> {
    ParsedRows {
        rows: Vec::new(),
        errors: Vec::new(),
    }
}

/// Insert the account (and a brand's profile); `None` when the sub already exists
async fn insert_user(
    tx: &mut Transaction<'_, Postgres>,
    row: &LegacyUserRow,
) -> Result<Option<(Uuid, AccountRole)>> {
    let Some(role) = row.account_role() else {
        return Ok(None);
    };

    let user_id: Option<Uuid> = sqlx::query_scalar(
        r#"
        INSERT INTO users (sub, email, role)
        VALUES ($1, $2, $3)
        ON CONFLICT (sub) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(&row.sub)
    .bind(row.email.trim())
    .bind(role)
    .fetch_optional(&mut **tx)
    .await
    .map_err(|e| AppError::from_db(e, "Account already exists"))?;

    let Some(user_id) = user_id else {
        return Ok(None);
    };

    if role == AccountRole::Brand {
        sqlx::query(
            r#"
            INSERT INTO brand_profiles (user_id, company_name)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(row.default_display_name())
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::from_db(e, "Brand profile already exists"))?;
    }

    Ok(Some((user_id, role)))
}

enum ModelOutcome {
    Imported,
    AlreadyExists,
    UnknownAccount,
}

async fn insert_model_profile(
    tx: &mut Transaction<'_, Postgres>,
    row: &LegacyModelRow,
) -> Result<ModelOutcome> {
    let inserted = sqlx::query(
        r#"
        INSERT INTO model_profiles (
            user_id, full_name, gender, date_of_birth, height_cm,
            location, bio, instagram_handle, phone
        )
        SELECT u.id, $2, $3, $4, $5, $6, $7, $8, $9
        FROM users u
        WHERE u.sub = $1 AND u.role = 'model'
        ON CONFLICT (user_id) DO NOTHING
        "#,
    )
    .bind(&row.sub)
    .bind(row.full_name.trim())
    .bind(row.gender.as_deref())
    .bind(row.date_of_birth)
    .bind(row.height_cm)
    .bind(row.location.as_deref())
    .bind(row.bio.as_deref())
    .bind(row.instagram_handle.as_deref())
    .bind(row.phone.as_deref())
    .execute(&mut **tx)
    .await
    .map_err(|e| AppError::from_db(e, "Model profile already exists"))?
    .rows_affected();

    if inserted > 0 {
        return Ok(ModelOutcome::Imported);
    }

    let account_exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM users WHERE sub = $1 AND role = 'model')",
    )
    .bind(&row.sub)
    .fetch_one(&mut **tx)
    .await?;

    Ok(if account_exists {
        ModelOutcome::AlreadyExists
    } else {
        ModelOutcome::UnknownAccount
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::lazy_test_pool;

    #[tokio::test]
    async fn test_import_needs_at_least_one_file() {
        let service = ImportService::new(lazy_test_pool());
        let result = service.import("test-admin", None, None).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
