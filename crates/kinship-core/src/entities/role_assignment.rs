//! Role assignment entity - one user's claim on a role for one calendar date

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::DomainError;
use crate::value_objects::{RoleKind, Snowflake};

/// Lifecycle of an assignment
///
/// `Active` is the only state from which a transition is allowed. Both exits
/// are terminal; nothing ever re-activates a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Active,
    /// Explicitly released by its holder
    Released,
    /// Replaced by the same user picking another role that day
    Superseded,
}

impl AssignmentStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Released => "released",
            Self::Superseded => "superseded",
        }
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssignmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "released" => Ok(Self::Released),
            "superseded" => Ok(Self::Superseded),
            other => Err(DomainError::InternalError(format!(
                "unknown assignment status: {other}"
            ))),
        }
    }
}

/// RoleAssignment entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignment {
    pub id: Snowflake,
    pub user_id: Uuid,
    pub family_id: Snowflake,
    pub role: RoleKind,
    pub assigned_date: NaiveDate,
    pub status: AssignmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RoleAssignment {
    /// New active assignment
    pub fn new(
        id: Snowflake,
        user_id: Uuid,
        family_id: Snowflake,
        role: RoleKind,
        assigned_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            family_id,
            role,
            assigned_date,
            status: AssignmentStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == AssignmentStatus::Active
    }

    #[inline]
    pub fn is_held_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    /// Holder gives the role up
    pub fn release(&mut self) -> Result<(), DomainError> {
        self.transition(AssignmentStatus::Released)
    }

    /// Holder picked a different role for the same date
    pub fn supersede(&mut self) -> Result<(), DomainError> {
        self.transition(AssignmentStatus::Superseded)
    }

    fn transition(&mut self, to: AssignmentStatus) -> Result<(), DomainError> {
        if !self.is_active() {
            return Err(DomainError::AlreadyInactive(self.id));
        }
        self.status = to;
        self.updated_at = Utc::now();
        Ok(())
    }
}
