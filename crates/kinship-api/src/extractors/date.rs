//! Board date extractor
//!
//! Reads `?date=YYYY-MM-DD`, falling back to the current UTC date. The date is
//! fixed once per request and handed to the services explicitly.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use chrono::{NaiveDate, Utc};
use kinship_service::DateQuery;

use crate::response::ApiError;

/// The server's current UTC date
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Day a role-board request refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleDate(pub NaiveDate);

impl From<DateQuery> for RoleDate {
    fn from(query: DateQuery) -> Self {
        Self(query.date.unwrap_or_else(today))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RoleDate
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<DateQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        Ok(query.into())
    }
}
