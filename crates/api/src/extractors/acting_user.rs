//! Acting user extractor.
//!
//! Authentication happens at the gateway in front of this service, which
//! forwards the authenticated user's ID in the `X-User-Id` header.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use domain::models::User;
use persistence::repositories::UserRepository;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;

/// Header carrying the authenticated user's ID.
pub const USER_ID_HEADER: &str = "x-user-id";

/// ID of the user on whose behalf the request is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActingUserId(pub Uuid);

impl ActingUserId {
    /// Loads the user row. An ID with no matching user is unauthorized.
    pub async fn load(self, pool: &PgPool) -> Result<User, ApiError> {
        UserRepository::find_by_id(pool, self.0)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApiError::Unauthorized("Unknown user".to_string()))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ActingUserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing X-User-Id header".to_string()))?;

        Uuid::parse_str(raw.trim())
            .map(ActingUserId)
            .map_err(|_| ApiError::Unauthorized("Invalid X-User-Id header".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(header: Option<&str>) -> Result<ActingUserId, ApiError> {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(USER_ID_HEADER, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        ActingUserId::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_extracts_valid_user_id() {
        let id = Uuid::new_v4();
        let acting = extract(Some(&id.to_string())).await.unwrap();
        assert_eq!(acting, ActingUserId(id));
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        assert!(matches!(extract(None).await, Err(ApiError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_malformed_header_is_unauthorized() {
        assert!(matches!(
            extract(Some("not-a-uuid")).await,
            Err(ApiError::Unauthorized(_))
        ));
    }
}
