//! Authentication extractor
//!
//! Extracts and validates JWT tokens from the Authorization header.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use uuid::Uuid;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from JWT token
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// User ID from the token subject
    pub user_id: Uuid,
}

impl AuthUser {
    /// Create a new AuthUser
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        let user_id = app_state
            .jwt_service()
            .authenticate(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected access token");
                ApiError::App(e)
            })?;

        Ok(AuthUser::new(user_id))
    }
}
