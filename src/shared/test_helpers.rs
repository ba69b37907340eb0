#[cfg(test)]
use crate::features::auth::model::AuthenticatedUser;

#[cfg(test)]
use crate::shared::constants::{ROLE_ADMIN, ROLE_BRAND, ROLE_MODEL};

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
fn user_with_role(sub: &str, role: &str) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: sub.to_string(),
        email: Some(format!("{}@example.com", sub)),
        roles: vec![role.to_string()],
    }
}

#[cfg(test)]
#[allow(dead_code)]
pub fn create_admin_user() -> AuthenticatedUser {
    user_with_role("test-admin", ROLE_ADMIN)
}

#[cfg(test)]
#[allow(dead_code)]
pub fn create_brand_user() -> AuthenticatedUser {
    user_with_role("test-brand", ROLE_BRAND)
}

#[cfg(test)]
#[allow(dead_code)]
pub fn create_model_user() -> AuthenticatedUser {
    user_with_role("test-model", ROLE_MODEL)
}

/// Wrap a router so every request arrives as `user`, bypassing JWT validation
#[cfg(test)]
#[allow(dead_code)]
pub fn with_user(router: Router, user: AuthenticatedUser) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let user = user.clone();
            async move {
                request.extensions_mut().insert(user);
                let response: Response = next.run(request).await;
                response
            }
        },
    ))
}

/// User with its own subject, for tests that onboard several accounts
#[cfg(test)]
#[allow(dead_code)]
pub fn user_with_sub(sub: &str, role: &str) -> AuthenticatedUser {
    user_with_role(sub, role)
}

/// Onboard `user` against a migrated database and return its profile id
#[cfg(test)]
#[allow(dead_code)]
pub async fn onboard(
    pool: &sqlx::PgPool,
    user: &AuthenticatedUser,
    role: crate::features::accounts::models::AccountRole,
    display_name: &str,
) -> uuid::Uuid {
    use crate::features::accounts::dtos::OnboardDto;
    use crate::features::accounts::AccountService;

    AccountService::new(pool.clone())
        .onboard(
            user,
            OnboardDto {
                role,
                email: None,
                display_name: display_name.to_string(),
            },
        )
        .await
        .unwrap()
        .profile_id
        .unwrap()
}
