//! Member entity - a user's (single) family affiliation

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Member entity
///
/// A user belongs to zero or one family. `family_id == None` means the
/// account exists but has not created or joined a family yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub user_id: Uuid,
    pub family_id: Option<Snowflake>,
    pub is_admin: bool,
    pub display_name: Option<String>,
    /// When the member attached to their current family
    pub joined_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Create an unaffiliated member record
    pub fn new(user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            family_id: None,
            is_admin: false,
            display_name: None,
            joined_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn has_family(&self) -> bool {
        self.family_id.is_some()
    }

    #[inline]
    pub fn belongs_to(&self, family_id: Snowflake) -> bool {
        self.family_id == Some(family_id)
    }

    /// Attach this member to a family
    ///
    /// Fails with `AlreadyMember` if a family is already set; the record is
    /// left untouched in that case.
    pub fn attach(&mut self, family_id: Snowflake, is_admin: bool) -> Result<(), DomainError> {
        if self.has_family() {
            return Err(DomainError::AlreadyMember);
        }
        let now = Utc::now();
        self.family_id = Some(family_id);
        self.is_admin = is_admin;
        self.joined_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Family id, or `NotInFamily` when unaffiliated
    pub fn require_family(&self) -> Result<Snowflake, DomainError> {
        self.family_id.ok_or(DomainError::NotInFamily)
    }
}
