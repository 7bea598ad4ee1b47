//! Membership manager
//!
//! Attaches a user to at most one family: as admin when they create it, as a
//! regular member when they join by invite code.

use kinship_core::entities::{Family, Member};
use kinship_core::{DomainError, Snowflake};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::family::FamilyService;

/// Membership service
pub struct MembershipService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MembershipService<'a> {
    /// Create a new MembershipService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Join the family behind an invite code
    #[instrument(skip(self))]
    pub async fn join_family(&self, user_id: Uuid, invite_code: &str) -> ServiceResult<Member> {
        if self.affiliated_member(user_id).await?.is_some() {
            debug!(%user_id, "Join rejected, user already has a family");
            return Err(DomainError::AlreadyMember.into());
        }

        let family = FamilyService::new(self.ctx)
            .find_by_invite_code(invite_code)
            .await
            .map_err(|e| {
                if e.as_domain().is_some_and(DomainError::is_not_found) {
                    ServiceError::from(DomainError::InvalidInviteCode)
                } else {
                    e
                }
            })?;

        // Storage guard decides concurrent joins for the same user
        let member = self
            .ctx
            .member_repo()
            .attach(user_id, family.id, false)
            .await?;

        info!(%user_id, family_id = %family.id, "Member joined family");

        Ok(member)
    }

    /// Create a family and make the caller its admin
    ///
    /// Idempotent: a user who already has a family gets that family and
    /// membership back and nothing is created.
    #[instrument(skip(self))]
    pub async fn create_family_and_join(
        &self,
        user_id: Uuid,
        family_name: &str,
    ) -> ServiceResult<(Family, Member)> {
        if let Some(existing) = self.existing_membership(user_id).await? {
            debug!(%user_id, "User already has a family, returning it");
            return Ok(existing);
        }

        let name = Family::normalize_name(family_name)?;
        let families = FamilyService::new(self.ctx);
        let repo = self.ctx.family_repo();

        let created = families
            .insert_with_fresh_code(&name, user_id, move |family| async move {
                let member = repo.create_with_founder(&family).await?;
                Ok::<_, DomainError>((family, member))
            })
            .await;

        match created {
            Ok((family, member)) => {
                info!(
                    %user_id,
                    family_id = %family.id,
                    invite_code = %family.invite_code,
                    "Family created with founder"
                );
                Ok((family, member))
            }
            // A duplicate submission won the race; report its result
            Err(ServiceError::Domain(DomainError::AlreadyMember)) => {
                debug!(%user_id, "Concurrent family creation detected");
                self.existing_membership(user_id)
                    .await?
                    .ok_or_else(|| ServiceError::internal("membership vanished after conflict"))
            }
            Err(e) => Err(e),
        }
    }

    /// The user's member record, affiliated or not
    #[instrument(skip(self))]
    pub async fn get_membership(&self, user_id: Uuid) -> ServiceResult<Option<Member>> {
        Ok(self.ctx.member_repo().find_by_user(user_id).await?)
    }

    /// Members of a family, in join order
    #[instrument(skip(self))]
    pub async fn list_family_members(&self, family_id: Snowflake) -> ServiceResult<Vec<Member>> {
        // Distinguish "no such family" from "no members"
        FamilyService::new(self.ctx).get_family(family_id).await?;

        Ok(self.ctx.member_repo().find_by_family(family_id).await?)
    }

    /// The user's family and member record, if they have one
    #[instrument(skip(self))]
    pub async fn existing_membership(&self, user_id: Uuid) -> ServiceResult<Option<(Family, Member)>> {
        let Some(member) = self.affiliated_member(user_id).await? else {
            return Ok(None);
        };
        let family_id = member.require_family()?;
        let family = FamilyService::new(self.ctx).get_family(family_id).await?;

        Ok(Some((family, member)))
    }

    /// The user's member record, or `NotInFamily`
    #[instrument(skip(self))]
    pub async fn require_membership(&self, user_id: Uuid) -> ServiceResult<Member> {
        self.affiliated_member(user_id)
            .await?
            .ok_or_else(|| DomainError::NotInFamily.into())
    }

    async fn affiliated_member(&self, user_id: Uuid) -> ServiceResult<Option<Member>> {
        let member = self.ctx.member_repo().find_by_user(user_id).await?;
        Ok(member.filter(Member::has_family))
    }
}
