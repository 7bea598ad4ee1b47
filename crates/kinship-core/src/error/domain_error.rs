//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{RoleKind, Snowflake};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Invite not found: {0}")]
    InviteNotFound(String),

    #[error("Family not found: {0}")]
    FamilyNotFound(Snowflake),

    #[error("Member not found")]
    MemberNotFound,

    #[error("Role assignment not found: {0}")]
    AssignmentNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid invite code")]
    InvalidInviteCode,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not part of a family")]
    NotInFamily,

    #[error("Role assignment belongs to another member")]
    NotAssignmentHolder,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Already part of a family")]
    AlreadyMember,

    #[error("Invite code already exists")]
    InviteCodeExists,

    #[error("{role} is already taken for this day")]
    RoleTaken { role: RoleKind },

    #[error("Another role change for this day is in progress")]
    AssignmentConflict,

    #[error("Role assignment {0} is no longer active")]
    AlreadyInactive(Snowflake),

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Could not generate a unique invite code after {attempts} attempts")]
    CodeGenerationExhausted { attempts: u32 },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::InviteNotFound(_) => "UNKNOWN_INVITE",
            Self::FamilyNotFound(_) => "UNKNOWN_FAMILY",
            Self::MemberNotFound => "UNKNOWN_MEMBER",
            Self::AssignmentNotFound(_) => "UNKNOWN_ASSIGNMENT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidInviteCode => "INVALID_INVITE_CODE",

            // Authorization
            Self::NotInFamily => "NOT_IN_FAMILY",
            Self::NotAssignmentHolder => "NOT_ASSIGNMENT_HOLDER",

            // Conflict
            Self::AlreadyMember => "ALREADY_MEMBER",
            Self::InviteCodeExists => "INVITE_CODE_EXISTS",
            Self::RoleTaken { .. } => "ROLE_TAKEN",
            Self::AssignmentConflict => "ASSIGNMENT_CONFLICT",
            Self::AlreadyInactive(_) => "ALREADY_INACTIVE",

            // Business Rules
            Self::CodeGenerationExhausted { .. } => "INVITE_CODE_GENERATION_EXHAUSTED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::InviteNotFound(_)
                | Self::FamilyNotFound(_)
                | Self::MemberNotFound
                | Self::AssignmentNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::InvalidInviteCode)
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotInFamily | Self::NotAssignmentHolder)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::AlreadyMember
                | Self::InviteCodeExists
                | Self::RoleTaken { .. }
                | Self::AssignmentConflict
                | Self::AlreadyInactive(_)
        )
    }

    /// Transient failure the caller may retry later
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::CodeGenerationExhausted { .. })
    }
}
