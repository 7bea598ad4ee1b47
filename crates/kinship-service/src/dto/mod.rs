//! Data transfer objects for API requests and responses
//!
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{AssignRoleRequest, CreateFamilyRequest, DateQuery};
pub use responses::{
    FamilyMembershipResponse, FamilyResponse, HealthChecks, HealthResponse,
    InvitePreviewResponse, MemberResponse, ReadinessResponse, RoleAssignmentResponse,
    RoleBoardResponse, RoleKindResponse,
};
