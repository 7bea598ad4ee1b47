//! Family handlers
//!
//! Endpoints for creating a family and reading the caller's own family.

use axum::{extract::State, Json};
use kinship_service::{
    CreateFamilyRequest, FamilyMembershipResponse, FamilyResponse, MemberResponse,
    MembershipService, ServiceError,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Create a family and join it as admin
///
/// POST /families
///
/// Repeating the request returns the family the caller already belongs to.
pub async fn create_family(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateFamilyRequest>,
) -> ApiResult<Created<Json<FamilyMembershipResponse>>> {
    let service = MembershipService::new(state.service_context());
    let created = service
        .create_family_and_join(auth.user_id, &request.family_name)
        .await?;
    Ok(Created(Json(created.into())))
}

/// Get the caller's family
///
/// GET /families/@me
pub async fn get_my_family(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<FamilyResponse>> {
    let service = MembershipService::new(state.service_context());
    let (family, _) = service
        .existing_membership(auth.user_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Family", "@me"))?;
    Ok(Json(FamilyResponse::from(&family)))
}

/// List members of the caller's family, in join order
///
/// GET /families/@me/members
pub async fn get_my_family_members(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<MemberResponse>>> {
    let service = MembershipService::new(state.service_context());
    let family_id = service.require_membership(auth.user_id).await?.require_family()?;
    let members = service.list_family_members(family_id).await?;
    Ok(Json(members.into_iter().map(MemberResponse::from).collect()))
}
