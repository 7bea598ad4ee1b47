//! Family entity - a group of accounts sharing data under one invite code

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;
use crate::value_objects::{InviteCode, Snowflake};

/// Family entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Family {
    pub id: Snowflake,
    pub name: String,
    /// Immutable once the family exists
    pub invite_code: InviteCode,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Family {
    pub const MAX_NAME_LEN: usize = 100;

    /// Create a new Family; the name must already be normalized
    pub fn new(id: Snowflake, name: String, invite_code: InviteCode, created_by: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            invite_code,
            created_by: Some(created_by),
            created_at: now,
            updated_at: now,
        }
    }

    /// Trim a requested family name and check its length
    pub fn normalize_name(raw: &str) -> Result<String, DomainError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(DomainError::ValidationError(
                "Please enter a family name".to_string(),
            ));
        }
        if name.chars().count() > Self::MAX_NAME_LEN {
            return Err(DomainError::ValidationError(format!(
                "Family name must be at most {} characters",
                Self::MAX_NAME_LEN
            )));
        }
        Ok(name.to_string())
    }

    #[inline]
    pub fn is_creator(&self, user_id: Uuid) -> bool {
        self.created_by == Some(user_id)
    }
}
