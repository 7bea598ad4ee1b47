//! Role assignment entity <-> model mapper

use chrono::NaiveDate;
use kinship_core::entities::{AssignmentStatus, RoleAssignment};
use kinship_core::error::DomainError;
use kinship_core::value_objects::{RoleKind, Snowflake};
use uuid::Uuid;

use crate::models::RoleAssignmentModel;

impl TryFrom<RoleAssignmentModel> for RoleAssignment {
    type Error = DomainError;

    fn try_from(model: RoleAssignmentModel) -> Result<Self, Self::Error> {
        let role = model
            .role_kind
            .parse::<RoleKind>()
            .map_err(|e| DomainError::InternalError(format!("assignment {}: {e}", model.id)))?;
        let status = model.status.parse::<AssignmentStatus>()?;

        Ok(RoleAssignment {
            id: Snowflake::new(model.id),
            user_id: model.user_id,
            family_id: Snowflake::new(model.family_id),
            role,
            assigned_date: model.assigned_date,
            status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Role assignment values for database insertion
pub struct RoleAssignmentInsert {
    pub id: i64,
    pub user_id: Uuid,
    pub family_id: i64,
    pub role_kind: &'static str,
    pub assigned_date: NaiveDate,
    pub status: &'static str,
}

impl RoleAssignmentInsert {
    pub fn new(assignment: &RoleAssignment) -> Self {
        Self {
            id: assignment.id.into_inner(),
            user_id: assignment.user_id,
            family_id: assignment.family_id.into_inner(),
            role_kind: assignment.role.as_str(),
            assigned_date: assignment.assigned_date,
            status: assignment.status.as_str(),
        }
    }
}
