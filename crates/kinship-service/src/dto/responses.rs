//! Response DTOs for API endpoints
//!
//! Ids are Snowflakes and serialize as strings.

use chrono::{DateTime, NaiveDate, Utc};
use kinship_core::{AssignmentStatus, RoleKind, Snowflake};
use serde::Serialize;
use uuid::Uuid;

// ============================================================================
// Family Responses
// ============================================================================

/// Family as seen by its members
#[derive(Debug, Clone, Serialize)]
pub struct FamilyResponse {
    pub id: Snowflake,
    pub family_name: String,
    pub invite_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Public invite card: enough to confirm the family before joining
#[derive(Debug, Clone, Serialize)]
pub struct InvitePreviewResponse {
    pub family_name: String,
    pub invite_code: String,
}

/// Family together with the caller's membership in it
#[derive(Debug, Clone, Serialize)]
pub struct FamilyMembershipResponse {
    pub family: FamilyResponse,
    pub member: MemberResponse,
}

// ============================================================================
// Member Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub user_id: Uuid,
    pub family_id: Option<Snowflake>,
    pub is_admin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub joined_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Role Responses
// ============================================================================

/// Catalogue entry
#[derive(Debug, Clone, Serialize)]
pub struct RoleKindResponse {
    pub name: RoleKind,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleAssignmentResponse {
    pub id: Snowflake,
    pub user_id: Uuid,
    pub family_id: Snowflake,
    pub role: RoleKind,
    pub assigned_date: NaiveDate,
    pub status: AssignmentStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleBoardResponse {
    pub date: NaiveDate,
    pub assignments: Vec<RoleAssignmentResponse>,
    pub my_role: Option<RoleAssignmentResponse>,
    pub taken_by_others: Vec<RoleKind>,
    pub available: Vec<RoleKind>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        let status = |ok: bool| if ok { "healthy" } else { "unhealthy" }.to_string();

        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: status(database_healthy),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
