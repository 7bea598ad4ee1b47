//! Daily role board
//!
//! Each member may hold one role per day and each role has at most one holder
//! per family per day. Dates are always supplied by the caller; nothing here
//! reads the clock to decide what "today" is.

use chrono::NaiveDate;
use kinship_core::entities::RoleAssignment;
use kinship_core::{DomainError, RoleKind, Snowflake};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Result of a release request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The assignment was active and is now released
    Released,
    /// The assignment was already released or superseded; nothing changed
    AlreadyInactive,
}

/// One family's board for one day, from one member's point of view
#[derive(Debug, Clone)]
pub struct RoleBoard {
    pub date: NaiveDate,
    /// Active assignments, oldest first
    pub assignments: Vec<RoleAssignment>,
    pub my_role: Option<RoleAssignment>,
    pub taken_by_others: Vec<RoleKind>,
    pub available: Vec<RoleKind>,
}

impl RoleBoard {
    fn build(date: NaiveDate, viewer: Uuid, assignments: Vec<RoleAssignment>) -> Self {
        let my_role = assignments.iter().find(|a| a.is_held_by(viewer)).cloned();
        let taken_by_others: Vec<RoleKind> = assignments
            .iter()
            .filter(|a| !a.is_held_by(viewer))
            .map(|a| a.role)
            .collect();
        let available = RoleKind::ALL
            .into_iter()
            .filter(|role| !assignments.iter().any(|a| a.role == *role))
            .collect();

        Self {
            date,
            assignments,
            my_role,
            taken_by_others,
            available,
        }
    }
}

/// Role board service
pub struct RoleBoardService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RoleBoardService<'a> {
    /// Create a new RoleBoardService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Active assignments of a family on a date, in creation order
    #[instrument(skip(self))]
    pub async fn get_roles_for_date(
        &self,
        family_id: Snowflake,
        date: NaiveDate,
    ) -> ServiceResult<Vec<RoleAssignment>> {
        Ok(self
            .ctx
            .role_assignment_repo()
            .find_active_for_family(family_id, date)
            .await?)
    }

    /// The user's active assignment on a date
    #[instrument(skip(self))]
    pub async fn get_active_role_for_user(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> ServiceResult<Option<RoleAssignment>> {
        Ok(self
            .ctx
            .role_assignment_repo()
            .find_active_for_user(user_id, date)
            .await?)
    }

    /// Claim a role for a date, replacing the user's current role that day
    #[instrument(skip(self))]
    pub async fn assign_role(
        &self,
        user_id: Uuid,
        family_id: Snowflake,
        role: RoleKind,
        date: NaiveDate,
    ) -> ServiceResult<RoleAssignment> {
        let repo = self.ctx.role_assignment_repo();

        if let Some(holder) = repo.find_active_holder(family_id, role, date).await? {
            if holder.is_held_by(user_id) {
                debug!(%user_id, %role, "Role already held by requester");
                return Ok(holder);
            }
            return Err(DomainError::RoleTaken { role }.into());
        }

        let assignment = RoleAssignment::new(self.ctx.generate_id(), user_id, family_id, role, date);
        repo.activate(&assignment).await?;

        info!(
            assignment_id = %assignment.id,
            %user_id,
            %family_id,
            %role,
            %date,
            "Role assigned"
        );

        Ok(assignment)
    }

    /// Release an assignment
    ///
    /// Releasing an assignment that is no longer active is a no-op.
    #[instrument(skip(self))]
    pub async fn release_role(&self, assignment_id: Snowflake) -> ServiceResult<ReleaseOutcome> {
        let assignment = self.load(assignment_id).await?;
        self.release_loaded(assignment).await
    }

    /// Release an assignment on behalf of its holder
    #[instrument(skip(self))]
    pub async fn release_own_role(
        &self,
        user_id: Uuid,
        assignment_id: Snowflake,
    ) -> ServiceResult<ReleaseOutcome> {
        let assignment = self.load(assignment_id).await?;
        if !assignment.is_held_by(user_id) {
            return Err(DomainError::NotAssignmentHolder.into());
        }
        self.release_loaded(assignment).await
    }

    /// The day's board as seen by `viewer`
    #[instrument(skip(self))]
    pub async fn role_board(
        &self,
        family_id: Snowflake,
        viewer: Uuid,
        date: NaiveDate,
    ) -> ServiceResult<RoleBoard> {
        let assignments = self.get_roles_for_date(family_id, date).await?;
        Ok(RoleBoard::build(date, viewer, assignments))
    }

    async fn load(&self, assignment_id: Snowflake) -> ServiceResult<RoleAssignment> {
        self.ctx
            .role_assignment_repo()
            .find_by_id(assignment_id)
            .await?
            .ok_or_else(|| DomainError::AssignmentNotFound(assignment_id).into())
    }

    async fn release_loaded(&self, mut assignment: RoleAssignment) -> ServiceResult<ReleaseOutcome> {
        match assignment.release() {
            Ok(()) => {}
            Err(DomainError::AlreadyInactive(id)) => {
                debug!(assignment_id = %id, status = %assignment.status, "Release of inactive assignment ignored");
                return Ok(ReleaseOutcome::AlreadyInactive);
            }
            Err(e) => return Err(e.into()),
        }

        // Lost a race with another release or a reassignment
        if !self.ctx.role_assignment_repo().release(assignment.id).await? {
            debug!(assignment_id = %assignment.id, "Assignment deactivated concurrently");
            return Ok(ReleaseOutcome::AlreadyInactive);
        }

        info!(
            assignment_id = %assignment.id,
            user_id = %assignment.user_id,
            role = %assignment.role,
            "Role released"
        );

        Ok(ReleaseOutcome::Released)
    }
}
