use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::accounts::dtos::{AccountResponseDto, OnboardDto};
use crate::features::accounts::models::{Account, AccountRole};
use crate::features::auth::model::AuthenticatedUser;

const ACCOUNT_COLUMNS: &str = r#"
    u.id, u.sub, u.email, u.role,
    COALESCE(mp.id, bp.id) AS profile_id,
    u.created_at
"#;

pub struct AccountService {
    pool: PgPool,
}

impl AccountService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the account and its empty profile in one transaction
    pub async fn onboard(
        &self,
        user: &AuthenticatedUser,
        dto: OnboardDto,
    ) -> Result<AccountResponseDto> {
        let role = requested_role(user, dto.role)?;

        let email = dto
            .email
            .or_else(|| user.email.clone())
            .ok_or_else(|| AppError::Validation("Email is required".to_string()))?;
        let display_name = dto.display_name.trim().to_string();

        let mut tx = self.pool.begin().await?;

        let user_id: uuid::Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO users (sub, email, role)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&user.sub)
        .bind(&email)
        .bind(role)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::from_db(e, "Account already onboarded"))?;

        let profile_sql = match role {
            AccountRole::Model => {
                Some("INSERT INTO model_profiles (user_id, full_name) VALUES ($1, $2)")
            }
            AccountRole::Brand => {
                Some("INSERT INTO brand_profiles (user_id, company_name) VALUES ($1, $2)")
            }
            AccountRole::Admin => None,
        };

        if let Some(sql) = profile_sql {
            sqlx::query(sql)
                .bind(user_id)
                .bind(&display_name)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::from_db(e, "Profile already exists"))?;
        }

        tx.commit().await?;

        tracing::info!("Account onboarded: sub={}, role={:?}", user.sub, role);

        self.get_me(&user.sub).await
    }

    pub async fn get_me(&self, sub: &str) -> Result<AccountResponseDto> {
        let sql = format!(
            r#"
            SELECT {ACCOUNT_COLUMNS}
            FROM users u
            LEFT JOIN model_profiles mp ON mp.user_id = u.id
            LEFT JOIN brand_profiles bp ON bp.user_id = u.id
            WHERE u.sub = $1
            "#
        );

        let account = sqlx::query_as::<_, Account>(&sql)
            .bind(sub)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "Account conflict"))?
            .ok_or_else(|| AppError::NotFound("Account not onboarded".to_string()))?;

        Ok(account.into())
    }
}

/// The requested account role must be backed by a role on the token
fn requested_role(user: &AuthenticatedUser, requested: AccountRole) -> Result<AccountRole> {
    let granted = user
        .roles
        .iter()
        .filter_map(|claim| AccountRole::from_claim(claim))
        .any(|role| role == requested);

    if !granted {
        return Err(AppError::Forbidden(format!(
            "Token does not grant the '{}' role",
            requested.claim()
        )));
    }
    Ok(requested)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{create_brand_user, create_model_user};

    #[test]
    fn test_requested_role_must_be_on_token() {
        assert_eq!(
            requested_role(&create_model_user(), AccountRole::Model).unwrap(),
            AccountRole::Model
        );
        assert!(matches!(
            requested_role(&create_brand_user(), AccountRole::Model),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            requested_role(&create_brand_user(), AccountRole::Admin),
            Err(AppError::Forbidden(_))
        ));
    }
}
