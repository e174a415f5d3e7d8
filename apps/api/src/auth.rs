//! Caller identity. Sessions are issued upstream; the gateway forwards the
//! authenticated user's id in `X-User-Id`.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::{Role, UserRow};

pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;
        let id = Uuid::parse_str(raw.trim()).map_err(|_| {
            warn!("Rejected malformed {USER_ID_HEADER} header");
            AppError::Unauthorized
        })?;
        Ok(AuthUser { id })
    }
}

/// Loads the caller and checks their role is one of `allowed`.
/// A user id that no longer exists is treated as unauthenticated.
pub async fn require_role(
    db: &PgPool,
    user_id: Uuid,
    allowed: &[Role],
) -> Result<UserRow, AppError> {
    let user: UserRow = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or(AppError::Unauthorized)?;
    ensure_role(&user, allowed)?;
    Ok(user)
}

pub fn ensure_role(user: &UserRow, allowed: &[Role]) -> Result<(), AppError> {
    match user.role() {
        Some(role) if allowed.contains(&role) => Ok(()),
        _ => Err(AppError::Forbidden(
            "You do not have permission to perform this action".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(header: Option<&str>) -> Result<AuthUser, AppError> {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(USER_ID_HEADER, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        AuthUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_valid_header_extracts_user() {
        let id = Uuid::new_v4();
        let user = extract(Some(&id.to_string())).await.unwrap();
        assert_eq!(user.id, id);
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        assert!(matches!(extract(None).await, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_malformed_header_is_unauthorized() {
        assert!(matches!(
            extract(Some("not-a-uuid")).await,
            Err(AppError::Unauthorized)
        ));
    }
}
