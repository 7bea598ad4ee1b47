//! Invite handlers
//!
//! Endpoints for previewing and accepting a family's invite code.

use axum::{extract::State, Json};
use kinship_service::{FamilyService, InvitePreviewResponse, MemberResponse, MembershipService};

use crate::extractors::{ApiPath, AuthUser, InviteCodePath};
use crate::response::ApiResult;
use crate::state::AppState;

/// Preview the family behind an invite code (no auth required)
///
/// GET /invites/{invite_code}
pub async fn get_invite(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<InviteCodePath>,
) -> ApiResult<Json<InvitePreviewResponse>> {
    let service = FamilyService::new(state.service_context());
    let family = service.find_by_invite_code(path.code()).await?;
    Ok(Json(family.into()))
}

/// Accept invite (join family)
///
/// POST /invites/{invite_code}/join
pub async fn join_family(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<InviteCodePath>,
) -> ApiResult<Json<MemberResponse>> {
    let service = MembershipService::new(state.service_context());
    let member = service.join_family(auth.user_id, path.code()).await?;
    Ok(Json(member.into()))
}
