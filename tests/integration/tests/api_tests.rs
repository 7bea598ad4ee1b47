//! API Integration Tests
//!
//! Start the real router on an ephemeral port over in-memory repositories and
//! drive it over HTTP. Tokens are minted with the test secret.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, day, fixtures::*, token_for, TestServer,
};
use reqwest::StatusCode;
use uuid::Uuid;

async fn family_with_founder(server: &TestServer) -> (Uuid, String, FamilyMembershipBody) {
    let user = Uuid::new_v4();
    let token = token_for(user);
    let response = server
        .post_auth("/api/v1/families", &token, &CreateFamilyBody::unique())
        .await
        .unwrap();
    let created: FamilyMembershipBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    (user, token, created)
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready_without_database() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_request_id_is_returned() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/v1/roles").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_missing_token_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/v1/members/@me").await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "MISSING_AUTHORIZATION");
}

#[tokio::test]
async fn test_invalid_token_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let response = server.get_auth("/api/v1/members/@me", "not-a-jwt").await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_TOKEN");
}

// ============================================================================
// Family Tests
// ============================================================================

#[tokio::test]
async fn test_create_family() {
    let server = TestServer::start().await.unwrap();
    let (user, token, created) = family_with_founder(&server).await;

    assert_eq!(created.family.invite_code.len(), 8);
    assert_eq!(created.family.created_by, Some(user));
    assert_eq!(created.member.user_id, user);
    assert!(created.member.is_admin);
    assert_eq!(created.member.family_id.as_deref(), Some(created.family.id.as_str()));

    let response = server.get_auth("/api/v1/families/@me", &token).await.unwrap();
    let family: FamilyBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(family.id, created.family.id);
    assert_eq!(family.family_name, created.family.family_name);
}

#[tokio::test]
async fn test_create_family_twice_returns_same_family() {
    let server = TestServer::start().await.unwrap();
    let (_, token, created) = family_with_founder(&server).await;

    let response = server
        .post_auth("/api/v1/families", &token, &CreateFamilyBody::named("Another"))
        .await
        .unwrap();
    let again: FamilyMembershipBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(again.family.id, created.family.id);
    assert_eq!(server.store.family_count(), 1);
}

#[tokio::test]
async fn test_create_family_rejects_empty_name() {
    let server = TestServer::start().await.unwrap();
    let token = token_for(Uuid::new_v4());

    let response = server
        .post_auth("/api/v1/families", &token, &CreateFamilyBody::named(""))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_family_name_length_ignores_padding() {
    let server = TestServer::start().await.unwrap();
    let longest = "a".repeat(100);

    let response = server
        .post_auth(
            "/api/v1/families",
            &token_for(Uuid::new_v4()),
            &CreateFamilyBody::named(&format!("  {longest}  ")),
        )
        .await
        .unwrap();
    let created: FamilyMembershipBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.family.family_name, longest);

    let response = server
        .post_auth(
            "/api/v1/families",
            &token_for(Uuid::new_v4()),
            &CreateFamilyBody::named(&"a".repeat(101)),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unaffiliated_user_has_no_family() {
    let server = TestServer::start().await.unwrap();
    let token = token_for(Uuid::new_v4());

    let response = server.get_auth("/api/v1/families/@me", &token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get_auth("/api/v1/members/@me", &token).await.unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_MEMBER");

    let response = server.get_auth("/api/v1/families/@me/members", &token).await.unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_IN_FAMILY");
}

// ============================================================================
// Invite Tests
// ============================================================================

#[tokio::test]
async fn test_invite_preview_and_join() {
    let server = TestServer::start().await.unwrap();
    let (founder, founder_token, created) = family_with_founder(&server).await;
    let code = created.family.invite_code.to_lowercase();

    // Preview needs no token
    let response = server.get(&format!("/api/v1/invites/{code}")).await.unwrap();
    let preview: InvitePreviewBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(preview.family_name, created.family.family_name);
    assert_eq!(preview.invite_code, created.family.invite_code);

    let joiner = Uuid::new_v4();
    let joiner_token = token_for(joiner);
    let response = server
        .post_auth_empty(&format!("/api/v1/invites/{code}/join"), &joiner_token)
        .await
        .unwrap();
    let member: MemberBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(member.family_id.as_deref(), Some(created.family.id.as_str()));
    assert!(!member.is_admin);

    let response = server
        .get_auth("/api/v1/families/@me/members", &founder_token)
        .await
        .unwrap();
    let members: Vec<MemberBody> = assert_json(response, StatusCode::OK).await.unwrap();
    let ids: Vec<Uuid> = members.iter().map(|m| m.user_id).collect();
    assert_eq!(ids, vec![founder, joiner]);
}

#[tokio::test]
async fn test_unknown_invite() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/api/v1/invites/ZZZZ9999").await.unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_INVITE");

    let token = token_for(Uuid::new_v4());
    let response = server
        .post_auth_empty("/api/v1/invites/ZZZZ9999/join", &token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_INVITE_CODE");
}

#[tokio::test]
async fn test_join_twice_conflicts() {
    let server = TestServer::start().await.unwrap();
    let (_, founder_token, created) = family_with_founder(&server).await;

    let response = server
        .post_auth_empty(
            &format!("/api/v1/invites/{}/join", created.family.invite_code),
            &founder_token,
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "ALREADY_MEMBER");
}

// ============================================================================
// Role Tests
// ============================================================================

#[tokio::test]
async fn test_role_catalogue() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/v1/roles").await.unwrap();
    let roles: Vec<RoleKindBody> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(roles.len(), 8);
    assert_eq!(roles[0].name, "Barista");
    assert!(roles.iter().any(|r| r.name == "Pet Carer" && r.description == "Love the pets"));
}

#[tokio::test]
async fn test_assign_and_view_board() {
    let server = TestServer::start().await.unwrap();
    let (_, founder_token, created) = family_with_founder(&server).await;
    let child_token = token_for(Uuid::new_v4());
    server
        .post_auth_empty(
            &format!("/api/v1/invites/{}/join", created.family.invite_code),
            &child_token,
        )
        .await
        .unwrap();
    let d = day(2025, 7, 1);

    let response = server
        .put_auth("/api/v1/families/@me/roles/@me", &founder_token, &AssignRoleBody::on("Chef", d))
        .await
        .unwrap();
    let chef: AssignmentBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(chef.role, "Chef");
    assert_eq!(chef.status, "active");
    assert_eq!(chef.assigned_date, d);
    assert_eq!(chef.family_id, created.family.id);

    // Someone else cannot take it
    let response = server
        .put_auth("/api/v1/families/@me/roles/@me", &child_token, &AssignRoleBody::on("chef", d))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "ROLE_TAKEN");

    let response = server
        .put_auth("/api/v1/families/@me/roles/@me", &child_token, &AssignRoleBody::on("pet_carer", d))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth("/api/v1/families/@me/roles?date=2025-07-01", &child_token)
        .await
        .unwrap();
    let board: RoleBoardBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(board.date, d);
    assert_eq!(board.assignments.len(), 2);
    assert_eq!(board.my_role.map(|a| a.role).as_deref(), Some("Pet Carer"));
    assert_eq!(board.taken_by_others, vec!["Chef".to_string()]);
    assert_eq!(board.available.len(), 6);

    let response = server
        .get_auth("/api/v1/members/@me/role?date=2025-07-01", &founder_token)
        .await
        .unwrap();
    let mine: Option<AssignmentBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(mine.map(|a| a.id), Some(chef.id));

    let response = server
        .get_auth("/api/v1/members/@me/role?date=2025-07-02", &founder_token)
        .await
        .unwrap();
    let mine: Option<AssignmentBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(mine.is_none());
}

#[tokio::test]
async fn test_assign_defaults_to_today() {
    let server = TestServer::start().await.unwrap();
    let (_, token, _) = family_with_founder(&server).await;

    let response = server
        .put_auth("/api/v1/families/@me/roles/@me", &token, &AssignRoleBody::today("Driver"))
        .await
        .unwrap();
    let assignment: AssignmentBody = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server.get_auth("/api/v1/families/@me/roles", &token).await.unwrap();
    let board: RoleBoardBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(board.date, assignment.assigned_date);
    assert_eq!(board.my_role.map(|a| a.id), Some(assignment.id));
}

#[tokio::test]
async fn test_assign_requires_family() {
    let server = TestServer::start().await.unwrap();
    let token = token_for(Uuid::new_v4());

    let response = server
        .put_auth("/api/v1/families/@me/roles/@me", &token, &AssignRoleBody::today("DJ"))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_IN_FAMILY");
}

#[tokio::test]
async fn test_unknown_role_is_bad_request() {
    let server = TestServer::start().await.unwrap();
    let (_, token, _) = family_with_founder(&server).await;

    let response = server
        .put_auth("/api/v1/families/@me/roles/@me", &token, &AssignRoleBody::today("Astronaut"))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_bad_date_query() {
    let server = TestServer::start().await.unwrap();
    let (_, token, _) = family_with_founder(&server).await;

    let response = server
        .get_auth("/api/v1/families/@me/roles?date=yesterday", &token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_QUERY_PARAMETER");
}

#[tokio::test]
async fn test_release_assignment() {
    let server = TestServer::start().await.unwrap();
    let (_, founder_token, created) = family_with_founder(&server).await;
    let d = day(2025, 7, 3);

    let response = server
        .put_auth("/api/v1/families/@me/roles/@me", &founder_token, &AssignRoleBody::on("Gardener", d))
        .await
        .unwrap();
    let assignment: AssignmentBody = assert_json(response, StatusCode::OK).await.unwrap();
    let path = format!("/api/v1/role-assignments/{}", assignment.id);

    // Not the holder
    let other_token = token_for(Uuid::new_v4());
    server
        .post_auth_empty(
            &format!("/api/v1/invites/{}/join", created.family.invite_code),
            &other_token,
        )
        .await
        .unwrap();
    let response = server.delete_auth(&path, &other_token).await.unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_ASSIGNMENT_HOLDER");

    let response = server.delete_auth(&path, &founder_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Releasing again is a no-op
    let response = server.delete_auth(&path, &founder_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_auth("/api/v1/families/@me/roles?date=2025-07-03", &founder_token)
        .await
        .unwrap();
    let board: RoleBoardBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(board.assignments.is_empty());
    assert!(board.my_role.is_none());
}

#[tokio::test]
async fn test_release_unknown_or_malformed_id() {
    let server = TestServer::start().await.unwrap();
    let token = token_for(Uuid::new_v4());

    let response = server
        .delete_auth("/api/v1/role-assignments/987654321", &token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_ASSIGNMENT");

    let response = server
        .delete_auth("/api/v1/role-assignments/chef", &token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_PATH_PARAMETER");
}
