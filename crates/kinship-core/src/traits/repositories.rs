//! Repository traits (ports) - define the interface for data access
//!
//! The exclusivity rules of the role board and the one-family-per-user rule
//! are enforced here, at the storage boundary, so that racing requests cannot
//! both succeed. Services add friendlier pre-checks on top.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::entities::{Family, Member, RoleAssignment};
use crate::error::DomainError;
use crate::value_objects::{InviteCode, RoleKind, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Family Repository
// ============================================================================

#[async_trait]
pub trait FamilyRepository: Send + Sync {
    /// Find family by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Family>>;

    /// Find family by its (normalized) invite code
    async fn find_by_invite_code(&self, code: &InviteCode) -> RepoResult<Option<Family>>;

    /// Check if an invite code is already issued
    async fn invite_code_exists(&self, code: &InviteCode) -> RepoResult<bool>;

    /// Insert a new family
    ///
    /// Fails with `InviteCodeExists` if the code collides.
    async fn create(&self, family: &Family) -> RepoResult<()>;

    /// Insert a new family and attach its creator as admin, atomically
    ///
    /// Fails with `InviteCodeExists` on a code collision and `AlreadyMember`
    /// if the creator already has a family; nothing is written in either case.
    async fn create_with_founder(&self, family: &Family) -> RepoResult<Member>;
}

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find the member record for a user
    async fn find_by_user(&self, user_id: Uuid) -> RepoResult<Option<Member>>;

    /// List the members of a family, in join order
    async fn find_by_family(&self, family_id: Snowflake) -> RepoResult<Vec<Member>>;

    /// Attach a user to a family, creating the record if needed
    ///
    /// Only succeeds while the stored family reference is empty; otherwise
    /// fails with `AlreadyMember` and leaves the record untouched.
    async fn attach(&self, user_id: Uuid, family_id: Snowflake, is_admin: bool)
        -> RepoResult<Member>;
}

// ============================================================================
// Role Assignment Repository
// ============================================================================

#[async_trait]
pub trait RoleAssignmentRepository: Send + Sync {
    /// Find assignment by ID, whatever its status
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<RoleAssignment>>;

    /// Active assignments of a family for a date, oldest first
    async fn find_active_for_family(
        &self,
        family_id: Snowflake,
        date: NaiveDate,
    ) -> RepoResult<Vec<RoleAssignment>>;

    /// The user's active assignment for a date
    async fn find_active_for_user(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> RepoResult<Option<RoleAssignment>>;

    /// Who actively holds a role in a family on a date
    async fn find_active_holder(
        &self,
        family_id: Snowflake,
        role: RoleKind,
        date: NaiveDate,
    ) -> RepoResult<Option<RoleAssignment>>;

    /// Supersede the user's active assignment for the date (if any) and insert
    /// `assignment` as the new active row, as one unit
    ///
    /// Fails with `RoleTaken` if another user holds the role that day and with
    /// `AssignmentConflict` if a concurrent change for the same user won.
    async fn activate(&self, assignment: &RoleAssignment) -> RepoResult<()>;

    /// Mark an active assignment released
    ///
    /// Returns `false` when no active row with that id exists.
    async fn release(&self, id: Snowflake) -> RepoResult<bool>;
}
