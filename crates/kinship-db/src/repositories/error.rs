//! Error handling utilities for repositories

use kinship_core::error::DomainError;
use kinship_core::value_objects::RoleKind;
use sqlx::Error as SqlxError;

pub const INVITE_CODE_INDEX: &str = "families_invite_code_uidx";
pub const ACTIVE_USER_INDEX: &str = "role_assignments_active_user_uidx";
pub const ACTIVE_ROLE_INDEX: &str = "role_assignments_active_role_uidx";

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce(Option<&str>) -> Option<DomainError>,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            if let Some(mapped) = on_unique(db_err.constraint()) {
                return mapped;
            }
        }
    }
    map_db_error(e)
}

/// Unique violation on families: only the invite code can collide
pub fn map_family_insert_error(e: SqlxError) -> DomainError {
    map_unique_violation(e, |constraint| match constraint {
        Some(INVITE_CODE_INDEX) => Some(DomainError::InviteCodeExists),
        _ => None,
    })
}

/// Unique violation on the role board's partial indexes
pub fn map_assignment_insert_error(e: SqlxError, role: RoleKind) -> DomainError {
    map_unique_violation(e, |constraint| match constraint {
        Some(ACTIVE_ROLE_INDEX) => Some(DomainError::RoleTaken { role }),
        Some(ACTIVE_USER_INDEX) => Some(DomainError::AssignmentConflict),
        _ => None,
    })
}
