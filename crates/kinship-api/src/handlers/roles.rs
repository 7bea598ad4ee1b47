//! Role handlers
//!
//! Endpoints for the role catalogue and the caller's family role board.

use axum::{extract::State, Json};
use kinship_core::RoleKind;
use kinship_service::{
    AssignRoleRequest, MembershipService, ReleaseOutcome, RoleAssignmentResponse,
    RoleBoardResponse, RoleBoardService, RoleKindResponse,
};
use tracing::debug;

use crate::extractors::{today, ApiPath, AssignmentIdPath, AuthUser, RoleDate, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// List every role kind with its description
///
/// GET /roles
pub async fn list_role_kinds() -> Json<Vec<RoleKindResponse>> {
    Json(RoleKind::ALL.into_iter().map(RoleKindResponse::from).collect())
}

/// The caller's family board for a day
///
/// GET /families/@me/roles?date=YYYY-MM-DD
pub async fn get_role_board(
    State(state): State<AppState>,
    auth: AuthUser,
    RoleDate(date): RoleDate,
) -> ApiResult<Json<RoleBoardResponse>> {
    let ctx = state.service_context();
    let family_id = MembershipService::new(ctx)
        .require_membership(auth.user_id)
        .await?
        .require_family()?;

    let board = RoleBoardService::new(ctx)
        .role_board(family_id, auth.user_id, date)
        .await?;
    Ok(Json(board.into()))
}

/// Claim a role for a day, replacing the caller's current one
///
/// PUT /families/@me/roles/@me
pub async fn assign_my_role(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<AssignRoleRequest>,
) -> ApiResult<Json<RoleAssignmentResponse>> {
    let date = request.date.unwrap_or_else(today);
    let ctx = state.service_context();
    let family_id = MembershipService::new(ctx)
        .require_membership(auth.user_id)
        .await?
        .require_family()?;

    let assignment = RoleBoardService::new(ctx)
        .assign_role(auth.user_id, family_id, request.role, date)
        .await?;
    Ok(Json(assignment.into()))
}

/// Release one of the caller's assignments
///
/// DELETE /role-assignments/{assignment_id}
pub async fn release_assignment(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<AssignmentIdPath>,
) -> ApiResult<NoContent> {
    let assignment_id = path.assignment_id()?;

    let service = RoleBoardService::new(state.service_context());
    if service.release_own_role(auth.user_id, assignment_id).await? == ReleaseOutcome::AlreadyInactive {
        debug!(%assignment_id, "Release was a no-op");
    }
    Ok(NoContent)
}
