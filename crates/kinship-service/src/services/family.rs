//! Family directory
//!
//! Creates families with unique invite codes and resolves codes back to
//! families. Families are never renamed or deleted here.

use std::future::Future;

use kinship_core::entities::Family;
use kinship_core::traits::RepoResult;
use kinship_core::{DomainError, InviteCode, Snowflake};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Code draws per family creation before giving up
pub const MAX_INVITE_CODE_ATTEMPTS: u32 = 5;

/// Family service
pub struct FamilyService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FamilyService<'a> {
    /// Create a new FamilyService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a family with a freshly issued invite code
    #[instrument(skip(self))]
    pub async fn create_family(&self, name: &str, creator: Uuid) -> ServiceResult<Family> {
        let name = Family::normalize_name(name)?;
        let repo = self.ctx.family_repo();

        let family = self
            .insert_with_fresh_code(&name, creator, move |family| async move {
                repo.create(&family).await.map(|()| family)
            })
            .await?;

        info!(
            family_id = %family.id,
            invite_code = %family.invite_code,
            created_by = %creator,
            "Family created"
        );

        Ok(family)
    }

    /// Resolve an invite code, ignoring case and surrounding whitespace
    #[instrument(skip(self))]
    pub async fn find_by_invite_code(&self, raw_code: &str) -> ServiceResult<Family> {
        // A malformed code cannot name any family
        let Ok(code) = InviteCode::parse(raw_code) else {
            debug!("Malformed invite code");
            return Err(DomainError::InviteNotFound(raw_code.trim().to_string()).into());
        };

        self.ctx
            .family_repo()
            .find_by_invite_code(&code)
            .await?
            .ok_or_else(|| DomainError::InviteNotFound(code.into_inner()).into())
    }

    /// Get family by ID
    #[instrument(skip(self))]
    pub async fn get_family(&self, family_id: Snowflake) -> ServiceResult<Family> {
        self.ctx
            .family_repo()
            .find_by_id(family_id)
            .await?
            .ok_or_else(|| DomainError::FamilyNotFound(family_id).into())
    }

    /// Build a family around a fresh invite code and hand it to `insert`
    ///
    /// Draws again when the code is already issued or when `insert` reports a
    /// collision; other errors end the attempt. `name` must be normalized.
    pub(crate) async fn insert_with_fresh_code<T, F, Fut>(
        &self,
        name: &str,
        creator: Uuid,
        insert: F,
    ) -> ServiceResult<T>
    where
        F: Fn(Family) -> Fut,
        Fut: Future<Output = RepoResult<T>>,
    {
        let repo = self.ctx.family_repo();

        for attempt in 1..=MAX_INVITE_CODE_ATTEMPTS {
            let code = self.ctx.invite_codes().next_code();

            if repo.invite_code_exists(&code).await? {
                warn!(attempt, code = %code, "Invite code already issued, drawing again");
                continue;
            }

            let family = Family::new(self.ctx.generate_id(), name.to_string(), code, creator);
            match insert(family).await {
                Ok(created) => return Ok(created),
                Err(DomainError::InviteCodeExists) => {
                    warn!(attempt, "Invite code taken concurrently, drawing again");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(DomainError::CodeGenerationExhausted {
            attempts: MAX_INVITE_CODE_ATTEMPTS,
        }
        .into())
    }
}
