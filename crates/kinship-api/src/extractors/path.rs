//! Path parameter extractors

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use kinship_core::Snowflake;
use serde::de::DeserializeOwned;

use crate::response::ApiError;

/// Extract path parameters, rejecting with the API error body
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        Ok(ApiPath(inner))
    }
}

/// Path parameters with assignment_id
#[derive(Debug, serde::Deserialize)]
pub struct AssignmentIdPath {
    pub assignment_id: String,
}

impl AssignmentIdPath {
    /// Parse assignment_id as Snowflake
    pub fn assignment_id(&self) -> Result<Snowflake, ApiError> {
        self.assignment_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid assignment_id format"))
    }
}

/// Path parameters for invite code
#[derive(Debug, serde::Deserialize)]
pub struct InviteCodePath {
    pub invite_code: String,
}

impl InviteCodePath {
    /// Get the invite code as typed by the user
    pub fn code(&self) -> &str {
        &self.invite_code
    }
}
