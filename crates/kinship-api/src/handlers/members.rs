//! Member handlers

use axum::{extract::State, Json};
use kinship_core::DomainError;
use kinship_service::{MemberResponse, MembershipService, RoleAssignmentResponse, RoleBoardService};

use crate::extractors::{AuthUser, RoleDate};
use crate::response::ApiResult;
use crate::state::AppState;

/// Get the caller's member record
///
/// GET /members/@me
pub async fn get_my_membership(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<MemberResponse>> {
    let service = MembershipService::new(state.service_context());
    let member = service
        .get_membership(auth.user_id)
        .await?
        .ok_or(DomainError::MemberNotFound)?;
    Ok(Json(member.into()))
}

/// Get the caller's active role for a day (`null` when they hold none)
///
/// GET /members/@me/role?date=YYYY-MM-DD
pub async fn get_my_role(
    State(state): State<AppState>,
    auth: AuthUser,
    RoleDate(date): RoleDate,
) -> ApiResult<Json<Option<RoleAssignmentResponse>>> {
    let service = RoleBoardService::new(state.service_context());
    let assignment = service.get_active_role_for_user(auth.user_id, date).await?;
    Ok(Json(assignment.map(RoleAssignmentResponse::from)))
}
