use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::password_resets::dtos::{PasswordResetQueryParams, PasswordResetResponseDto};
use crate::features::password_resets::models::{
    PasswordResetRequest, ResetRequestStatus, RESET_REQUEST_COLUMNS,
};

pub struct PasswordResetService {
    pool: PgPool,
}

/// Emails compare case-insensitively; store them trimmed and lowercased
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl PasswordResetService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a request, or hand back the one already open for this email.
    ///
    /// Returns `true` alongside the request when it was newly created.
    pub async fn create(&self, email: &str) -> Result<(PasswordResetResponseDto, bool)> {
        let email = normalize_email(email);

        if let Some(open) = self.find_open(&email).await? {
            return Ok((open.into(), false));
        }

        let sql = format!(
            r#"
            INSERT INTO password_reset_requests (email)
            VALUES ($1)
            RETURNING {RESET_REQUEST_COLUMNS}
            "#
        );
        let inserted = sqlx::query_as::<_, PasswordResetRequest>(&sql)
            .bind(&email)
            .fetch_one(&self.pool)
            .await;

        match inserted {
            Ok(request) => {
                tracing::info!("Password reset requested: id={}", request.id);
                Ok((request.into(), true))
            }
            // A concurrent request won the partial unique index
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                let open = self.find_open(&email).await?.ok_or_else(|| {
                    AppError::Conflict("Password reset request changed concurrently".to_string())
                })?;
                Ok((open.into(), false))
            }
            Err(e) => Err(AppError::from_db(e, "Password reset already requested")),
        }
    }

    async fn find_open(&self, email: &str) -> Result<Option<PasswordResetRequest>> {
        let sql = format!(
            r#"
            SELECT {RESET_REQUEST_COLUMNS}
            FROM password_reset_requests
            WHERE lower(email) = $1 AND status = 'open'
            "#
        );
        let request = sqlx::query_as::<_, PasswordResetRequest>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(request)
    }

    pub async fn list(
        &self,
        params: &PasswordResetQueryParams,
    ) -> Result<(Vec<PasswordResetResponseDto>, i64)> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM password_reset_requests WHERE ($1::reset_request_status IS NULL OR status = $1)",
        )
        .bind(params.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count password reset requests: {:?}", e);
            AppError::Database(e)
        })?;

        let sql = format!(
            r#"
            SELECT {RESET_REQUEST_COLUMNS}
            FROM password_reset_requests
            WHERE ($1::reset_request_status IS NULL OR status = $1)
            ORDER BY requested_at DESC
            LIMIT $2 OFFSET $3
            "#
        );
        let rows = sqlx::query_as::<_, PasswordResetRequest>(&sql)
            .bind(params.status)
            .bind(params.limit())
            .bind(params.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list password reset requests: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    /// Open -> Resolved, once
    pub async fn resolve(&self, admin_sub: &str, id: Uuid) -> Result<PasswordResetResponseDto> {
        let sql = format!(
            r#"
            UPDATE password_reset_requests
            SET status = 'resolved', resolved_at = NOW(), resolved_by = $2
            WHERE id = $1 AND status = 'open'
            RETURNING {RESET_REQUEST_COLUMNS}
            "#
        );
        let resolved = sqlx::query_as::<_, PasswordResetRequest>(&sql)
            .bind(id)
            .bind(admin_sub)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(request) = resolved {
            tracing::info!("Password reset {} resolved by admin {}", id, admin_sub);
            return Ok(request.into());
        }

        let status: Option<ResetRequestStatus> =
            sqlx::query_scalar("SELECT status FROM password_reset_requests WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        match status {
            Some(_) => Err(AppError::Conflict(
                "Password reset request is already resolved".to_string(),
            )),
            None => Err(AppError::NotFound(format!(
                "Password reset request {} not found",
                id
            ))),
        }
    }
}
