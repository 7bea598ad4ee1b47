//! Service integration tests
//!
//! Exercise the family directory, membership manager, and role board over the
//! in-memory store. No external services required.
//!
//! Run with: cargo test -p integration-tests --test service_tests

use std::collections::HashSet;
use std::sync::Arc;

use integration_tests::{
    day, memory_context, memory_context_with_codes, MemoryStore, ScriptedInviteCodes,
};
use kinship_core::{AssignmentStatus, DomainError, InviteCode, RoleKind, Snowflake};
use kinship_service::{
    FamilyService, MembershipService, ReleaseOutcome, RoleBoardService, ServiceError,
    MAX_INVITE_CODE_ATTEMPTS,
};
use uuid::Uuid;

fn domain(err: &ServiceError) -> &DomainError {
    err.as_domain().expect("domain error")
}

// ============================================================================
// Family Directory
// ============================================================================

#[tokio::test]
async fn test_generated_invite_codes_are_unique() {
    let store = Arc::new(MemoryStore::new());
    let ctx = memory_context(&store);
    let families = FamilyService::new(&ctx);

    for i in 0..50 {
        families
            .create_family(&format!("Family {i}"), Uuid::new_v4())
            .await
            .unwrap();
    }

    let codes = store.invite_codes();
    let distinct: HashSet<_> = codes.iter().collect();
    assert_eq!(codes.len(), 50);
    assert_eq!(distinct.len(), 50);
    assert!(codes.iter().all(|c| InviteCode::parse(c.as_str()).is_ok()));
}

#[tokio::test]
async fn test_invite_lookup_ignores_case_and_whitespace() {
    let store = Arc::new(MemoryStore::new());
    let ctx = memory_context_with_codes(&store, Arc::new(ScriptedInviteCodes::new(["AB12CD34"])));
    let families = FamilyService::new(&ctx);

    let created = families.create_family("  The Smiths  ", Uuid::new_v4()).await.unwrap();
    assert_eq!(created.name, "The Smiths");
    assert_eq!(created.invite_code.as_str(), "AB12CD34");

    let found = families.find_by_invite_code(" ab12cd34 ").await.unwrap();
    assert_eq!(found.id, created.id);
}

#[tokio::test]
async fn test_unknown_and_malformed_codes_are_not_found() {
    let store = Arc::new(MemoryStore::new());
    let ctx = memory_context(&store);
    let families = FamilyService::new(&ctx);

    let err = families.find_by_invite_code("ZZZZ9999").await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::InviteNotFound(code) if code == "ZZZZ9999"));

    let err = families.find_by_invite_code("no!").await.unwrap_err();
    assert!(domain(&err).is_not_found());
}

#[tokio::test]
async fn test_family_name_is_validated() {
    let store = Arc::new(MemoryStore::new());
    let ctx = memory_context(&store);
    let families = FamilyService::new(&ctx);

    let err = families.create_family("   ", Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::ValidationError(_)));

    let err = families
        .create_family(&"x".repeat(101), Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::ValidationError(_)));
    assert_eq!(store.family_count(), 0);
}

#[tokio::test]
async fn test_issued_code_is_skipped() {
    let store = Arc::new(MemoryStore::new());
    let codes = Arc::new(ScriptedInviteCodes::new(["AAAA1111", "AAAA1111", "BBBB2222"]));
    let ctx = memory_context_with_codes(&store, codes.clone());
    let families = FamilyService::new(&ctx);

    let first = families.create_family("First", Uuid::new_v4()).await.unwrap();
    let second = families.create_family("Second", Uuid::new_v4()).await.unwrap();

    assert_eq!(first.invite_code.as_str(), "AAAA1111");
    assert_eq!(second.invite_code.as_str(), "BBBB2222");
    assert_eq!(codes.remaining(), 0);
}

#[tokio::test]
async fn test_storage_collision_is_retried() {
    let store = Arc::new(MemoryStore::new());
    let ctx = memory_context(&store);
    store.inject_code_collisions(2);

    let family = FamilyService::new(&ctx)
        .create_family("Lucky", Uuid::new_v4())
        .await
        .unwrap();

    assert_eq!(store.family_count(), 1);
    assert_eq!(store.invite_codes(), vec![family.invite_code]);
}

#[tokio::test]
async fn test_code_generation_gives_up() {
    let store = Arc::new(MemoryStore::new());
    let ctx = memory_context_with_codes(&store, Arc::new(ScriptedInviteCodes::constant("SAME0000")));
    let families = FamilyService::new(&ctx);

    families.create_family("Owner", Uuid::new_v4()).await.unwrap();
    let err = families.create_family("Unlucky", Uuid::new_v4()).await.unwrap_err();

    assert!(matches!(
        domain(&err),
        DomainError::CodeGenerationExhausted { attempts } if *attempts == MAX_INVITE_CODE_ATTEMPTS
    ));
    assert_eq!(err.status_code(), 503);
    assert_eq!(store.family_count(), 1);
}

#[tokio::test]
async fn test_get_unknown_family() {
    let store = Arc::new(MemoryStore::new());
    let ctx = memory_context(&store);

    let err = FamilyService::new(&ctx)
        .get_family(Snowflake::new(42))
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::FamilyNotFound(id) if id.into_inner() == 42));
}

// ============================================================================
// Membership Manager
// ============================================================================

#[tokio::test]
async fn test_the_smiths() {
    let store = Arc::new(MemoryStore::new());
    let ctx = memory_context(&store);
    let membership = MembershipService::new(&ctx);
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

    let (family, founder) = membership.create_family_and_join(a, "The Smiths").await.unwrap();
    assert!(InviteCode::parse(family.invite_code.as_str()).is_ok());
    assert!(founder.is_admin);
    assert_eq!(family.created_by, Some(a));

    let joined = membership
        .join_family(b, &family.invite_code.as_str().to_lowercase())
        .await
        .unwrap();
    assert_eq!(joined.family_id, Some(family.id));
    assert!(!joined.is_admin);

    let a_record = membership.get_membership(a).await.unwrap().unwrap();
    let b_record = membership.get_membership(b).await.unwrap().unwrap();
    assert_eq!(a_record.family_id, b_record.family_id);
    assert!(a_record.is_admin);
    assert!(!b_record.is_admin);

    let members = membership.list_family_members(family.id).await.unwrap();
    let ids: Vec<Uuid> = members.iter().map(|m| m.user_id).collect();
    assert_eq!(ids, vec![a, b]);
}

#[tokio::test]
async fn test_join_when_already_member_changes_nothing() {
    let store = Arc::new(MemoryStore::new());
    let ctx = memory_context(&store);
    let membership = MembershipService::new(&ctx);
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

    let (first, _) = membership.create_family_and_join(a, "First").await.unwrap();
    let (second, _) = membership.create_family_and_join(b, "Second").await.unwrap();
    let before = membership.get_membership(a).await.unwrap().unwrap();

    let err = membership
        .join_family(a, second.invite_code.as_str())
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::AlreadyMember));

    let after = membership.get_membership(a).await.unwrap().unwrap();
    assert_eq!(after.family_id, Some(first.id));
    assert_eq!(after.is_admin, before.is_admin);
    assert_eq!(after.joined_at, before.joined_at);
    assert_eq!(membership.list_family_members(second.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_join_with_unknown_code() {
    let store = Arc::new(MemoryStore::new());
    let ctx = memory_context(&store);
    let membership = MembershipService::new(&ctx);
    let user = Uuid::new_v4();

    let err = membership.join_family(user, "NOPE0000").await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::InvalidInviteCode));
    assert_eq!(err.status_code(), 400);

    let err = membership.join_family(user, "short").await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::InvalidInviteCode));
    assert!(membership.get_membership(user).await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_family_and_join_is_idempotent() {
    let store = Arc::new(MemoryStore::new());
    let ctx = memory_context(&store);
    let membership = MembershipService::new(&ctx);
    let user = Uuid::new_v4();

    let (first, _) = membership.create_family_and_join(user, "Hendersons").await.unwrap();
    let (again, member) = membership
        .create_family_and_join(user, "Hendersons again")
        .await
        .unwrap();

    assert_eq!(again.id, first.id);
    assert_eq!(again.name, "Hendersons");
    assert!(member.is_admin);
    assert_eq!(store.family_count(), 1);
    assert_eq!(store.member_count(), 1);
}

#[tokio::test]
async fn test_concurrent_family_creation_yields_one_family() {
    let store = Arc::new(MemoryStore::new());
    let ctx = memory_context(&store);
    let user = Uuid::new_v4();

    let (first, second) = (MembershipService::new(&ctx), MembershipService::new(&ctx));
    let (left, right) = tokio::join!(
        first.create_family_and_join(user, "Race"),
        second.create_family_and_join(user, "Race"),
    );

    let (left, _) = left.unwrap();
    let (right, _) = right.unwrap();
    assert_eq!(left.id, right.id);
    assert_eq!(store.family_count(), 1);
}

#[tokio::test]
async fn test_create_family_race_returns_winner() {
    let store = Arc::new(MemoryStore::new());
    let ctx = memory_context(&store);
    let membership = MembershipService::new(&ctx);
    let user = Uuid::new_v4();

    let (winner, _) = membership.create_family_and_join(user, "Race").await.unwrap();

    // The duplicate's membership check misses the row the winner just wrote
    store.inject_stale_member_reads(1);
    let (family, member) = membership
        .create_family_and_join(user, "Race duplicate")
        .await
        .unwrap();

    assert_eq!(family.id, winner.id);
    assert_eq!(family.name, "Race");
    assert_eq!(member.family_id, Some(winner.id));
    assert!(member.is_admin);
    assert_eq!(store.family_count(), 1);
    assert_eq!(store.member_count(), 1);
}

#[tokio::test]
async fn test_join_race_is_rejected_by_storage() {
    let store = Arc::new(MemoryStore::new());
    let ctx = memory_context(&store);
    let membership = MembershipService::new(&ctx);
    let (owner, other, joiner) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

    let (first, _) = membership.create_family_and_join(owner, "First").await.unwrap();
    let (second, _) = membership.create_family_and_join(other, "Second").await.unwrap();
    membership
        .join_family(joiner, first.invite_code.as_str())
        .await
        .unwrap();

    store.inject_stale_member_reads(1);
    let err = membership
        .join_family(joiner, second.invite_code.as_str())
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::AlreadyMember));

    let member = membership.get_membership(joiner).await.unwrap().unwrap();
    assert_eq!(member.family_id, Some(first.id));
    assert!(!member.is_admin);
    assert_eq!(membership.list_family_members(second.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_founder_retry_after_code_collision() {
    let store = Arc::new(MemoryStore::new());
    let ctx = memory_context(&store);
    store.inject_code_collisions(1);

    let (family, member) = MembershipService::new(&ctx)
        .create_family_and_join(Uuid::new_v4(), "Persistent")
        .await
        .unwrap();

    assert_eq!(member.family_id, Some(family.id));
    assert_eq!(store.family_count(), 1);
}

#[tokio::test]
async fn test_require_membership() {
    let store = Arc::new(MemoryStore::new());
    let ctx = memory_context(&store);
    let membership = MembershipService::new(&ctx);

    let err = membership.require_membership(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::NotInFamily));
    assert!(membership.existing_membership(Uuid::new_v4()).await.unwrap().is_none());
}

// ============================================================================
// Daily Role Board
// ============================================================================

struct Household {
    store: Arc<MemoryStore>,
    ctx: kinship_service::ServiceContext,
    family_id: Snowflake,
    parent: Uuid,
    child: Uuid,
}

async fn household() -> Household {
    let store = Arc::new(MemoryStore::new());
    let ctx = memory_context(&store);
    let (parent, child) = (Uuid::new_v4(), Uuid::new_v4());

    let membership = MembershipService::new(&ctx);
    let (family, _) = membership.create_family_and_join(parent, "Board Test").await.unwrap();
    membership
        .join_family(child, family.invite_code.as_str())
        .await
        .unwrap();

    Household {
        store,
        ctx,
        family_id: family.id,
        parent,
        child,
    }
}

#[tokio::test]
async fn test_role_is_exclusive_per_day() {
    let h = household().await;
    let board = RoleBoardService::new(&h.ctx);
    let d = day(2025, 6, 1);

    board.assign_role(h.parent, h.family_id, RoleKind::Chef, d).await.unwrap();
    let err = board
        .assign_role(h.child, h.family_id, RoleKind::Chef, d)
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::RoleTaken { role: RoleKind::Chef }));

    let roles = board.get_roles_for_date(h.family_id, d).await.unwrap();
    let chefs: Vec<_> = roles.iter().filter(|a| a.role == RoleKind::Chef).collect();
    assert_eq!(chefs.len(), 1);
    assert_eq!(chefs[0].user_id, h.parent);
    assert!(board.get_active_role_for_user(h.child, d).await.unwrap().is_none());
}

#[tokio::test]
async fn test_reassignment_supersedes_previous_role() {
    let h = household().await;
    let board = RoleBoardService::new(&h.ctx);
    let d = day(2025, 6, 2);

    let chef = board.assign_role(h.parent, h.family_id, RoleKind::Chef, d).await.unwrap();
    let dj = board.assign_role(h.parent, h.family_id, RoleKind::Dj, d).await.unwrap();

    let active = board.get_active_role_for_user(h.parent, d).await.unwrap().unwrap();
    assert_eq!(active.id, dj.id);
    assert_eq!(active.role, RoleKind::Dj);

    let roles = board.get_roles_for_date(h.family_id, d).await.unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].role, RoleKind::Dj);

    let rows = h.store.all_assignments();
    let old = rows.iter().find(|a| a.id == chef.id).unwrap();
    assert_eq!(old.status, AssignmentStatus::Superseded);

    // The freed role is open to others again
    board.assign_role(h.child, h.family_id, RoleKind::Chef, d).await.unwrap();
}

#[tokio::test]
async fn test_repicking_held_role_returns_existing_row() {
    let h = household().await;
    let board = RoleBoardService::new(&h.ctx);
    let d = day(2025, 6, 3);

    let first = board.assign_role(h.child, h.family_id, RoleKind::Gardener, d).await.unwrap();
    let again = board.assign_role(h.child, h.family_id, RoleKind::Gardener, d).await.unwrap();

    assert_eq!(first.id, again.id);
    assert_eq!(h.store.all_assignments().len(), 1);
}

#[tokio::test]
async fn test_unused_date_is_empty() {
    let h = household().await;
    let board = RoleBoardService::new(&h.ctx);

    board
        .assign_role(h.parent, h.family_id, RoleKind::Driver, day(2025, 6, 4))
        .await
        .unwrap();

    assert!(board
        .get_roles_for_date(h.family_id, day(2025, 6, 5))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_roles_listed_in_creation_order() {
    let h = household().await;
    let board = RoleBoardService::new(&h.ctx);
    let d = day(2025, 6, 6);

    board.assign_role(h.child, h.family_id, RoleKind::PetCarer, d).await.unwrap();
    board.assign_role(h.parent, h.family_id, RoleKind::Barista, d).await.unwrap();

    let roles: Vec<RoleKind> = board
        .get_roles_for_date(h.family_id, d)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.role)
        .collect();
    assert_eq!(roles, vec![RoleKind::PetCarer, RoleKind::Barista]);
}

#[tokio::test]
async fn test_release_and_release_again() {
    let h = household().await;
    let board = RoleBoardService::new(&h.ctx);
    let d = day(2025, 6, 7);

    let assignment = board.assign_role(h.parent, h.family_id, RoleKind::Cleaner, d).await.unwrap();

    assert_eq!(board.release_role(assignment.id).await.unwrap(), ReleaseOutcome::Released);
    let snapshot = h.store.all_assignments();
    assert_eq!(snapshot[0].status, AssignmentStatus::Released);

    assert_eq!(
        board.release_role(assignment.id).await.unwrap(),
        ReleaseOutcome::AlreadyInactive
    );
    let after = h.store.all_assignments();
    assert_eq!(after.len(), snapshot.len());
    assert_eq!(after[0].status, AssignmentStatus::Released);
    assert_eq!(after[0].updated_at, snapshot[0].updated_at);

    assert!(board.get_active_role_for_user(h.parent, d).await.unwrap().is_none());
}

#[tokio::test]
async fn test_release_superseded_row_is_noop() {
    let h = household().await;
    let board = RoleBoardService::new(&h.ctx);
    let d = day(2025, 6, 8);

    let old = board.assign_role(h.child, h.family_id, RoleKind::Librarian, d).await.unwrap();
    let current = board.assign_role(h.child, h.family_id, RoleKind::Dj, d).await.unwrap();

    assert_eq!(board.release_role(old.id).await.unwrap(), ReleaseOutcome::AlreadyInactive);
    let active = board.get_active_role_for_user(h.child, d).await.unwrap().unwrap();
    assert_eq!(active.id, current.id);
}

#[tokio::test]
async fn test_release_unknown_assignment() {
    let h = household().await;
    let err = RoleBoardService::new(&h.ctx)
        .release_role(Snowflake::new(1))
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::AssignmentNotFound(_)));
}

#[tokio::test]
async fn test_only_holder_may_release_own_role() {
    let h = household().await;
    let board = RoleBoardService::new(&h.ctx);
    let d = day(2025, 6, 9);

    let assignment = board.assign_role(h.parent, h.family_id, RoleKind::Chef, d).await.unwrap();

    let err = board.release_own_role(h.child, assignment.id).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::NotAssignmentHolder));
    assert!(board.get_active_role_for_user(h.parent, d).await.unwrap().is_some());

    assert_eq!(
        board.release_own_role(h.parent, assignment.id).await.unwrap(),
        ReleaseOutcome::Released
    );
}

#[tokio::test]
async fn test_role_board_view() {
    let h = household().await;
    let board = RoleBoardService::new(&h.ctx);
    let d = day(2025, 6, 10);

    board.assign_role(h.parent, h.family_id, RoleKind::Chef, d).await.unwrap();
    board.assign_role(h.child, h.family_id, RoleKind::Dj, d).await.unwrap();

    let view = board.role_board(h.family_id, h.child, d).await.unwrap();
    assert_eq!(view.date, d);
    assert_eq!(view.my_role.map(|a| a.role), Some(RoleKind::Dj));
    assert_eq!(view.taken_by_others, vec![RoleKind::Chef]);
    assert_eq!(view.available.len(), RoleKind::ALL.len() - 2);
}

#[tokio::test]
async fn test_assignments_do_not_carry_over() {
    let h = household().await;
    let board = RoleBoardService::new(&h.ctx);

    board
        .assign_role(h.parent, h.family_id, RoleKind::Chef, day(2025, 6, 11))
        .await
        .unwrap();

    // Same role, next day, different member
    board
        .assign_role(h.child, h.family_id, RoleKind::Chef, day(2025, 6, 12))
        .await
        .unwrap();
    assert!(board
        .get_active_role_for_user(h.parent, day(2025, 6, 12))
        .await
        .unwrap()
        .is_none());
}
