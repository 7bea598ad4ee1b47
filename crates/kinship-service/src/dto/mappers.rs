//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use kinship_core::entities::{Family, Member, RoleAssignment};
use kinship_core::RoleKind;

use crate::services::RoleBoard;

use super::responses::{
    FamilyMembershipResponse, FamilyResponse, InvitePreviewResponse, MemberResponse,
    RoleAssignmentResponse, RoleBoardResponse, RoleKindResponse,
};

// ============================================================================
// Family Mappers
// ============================================================================

impl From<&Family> for FamilyResponse {
    fn from(family: &Family) -> Self {
        Self {
            id: family.id,
            family_name: family.name.clone(),
            invite_code: family.invite_code.to_string(),
            created_by: family.created_by,
            created_at: family.created_at,
        }
    }
}

impl From<Family> for InvitePreviewResponse {
    fn from(family: Family) -> Self {
        Self {
            family_name: family.name,
            invite_code: family.invite_code.into_inner(),
        }
    }
}

impl From<(Family, Member)> for FamilyMembershipResponse {
    fn from((family, member): (Family, Member)) -> Self {
        Self {
            family: FamilyResponse::from(&family),
            member: MemberResponse::from(member),
        }
    }
}

// ============================================================================
// Member Mappers
// ============================================================================

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            user_id: member.user_id,
            family_id: member.family_id,
            is_admin: member.is_admin,
            display_name: member.display_name,
            joined_at: member.joined_at,
        }
    }
}

// ============================================================================
// Role Mappers
// ============================================================================

impl From<RoleKind> for RoleKindResponse {
    fn from(role: RoleKind) -> Self {
        Self {
            name: role,
            description: role.description(),
        }
    }
}

impl From<RoleAssignment> for RoleAssignmentResponse {
    fn from(a: RoleAssignment) -> Self {
        Self {
            id: a.id,
            user_id: a.user_id,
            family_id: a.family_id,
            role: a.role,
            assigned_date: a.assigned_date,
            status: a.status,
            created_at: a.created_at,
        }
    }
}

impl From<RoleBoard> for RoleBoardResponse {
    fn from(board: RoleBoard) -> Self {
        Self {
            date: board.date,
            assignments: board.assignments.into_iter().map(Into::into).collect(),
            my_role: board.my_role.map(Into::into),
            taken_by_others: board.taken_by_others,
            available: board.available,
        }
    }
}
