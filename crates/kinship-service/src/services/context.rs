//! Service context - dependency container for services
//!
//! Holds the repositories, id and invite-code sources, and the token verifier.

use std::sync::Arc;

use kinship_common::auth::JwtService;
use kinship_core::traits::{FamilyRepository, MemberRepository, RoleAssignmentRepository};
use kinship_core::{InviteCodeSource, RandomInviteCodes, Snowflake, SnowflakeGenerator};
use kinship_db::PgPool;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// `pool` is only used for readiness probes; every data access goes through
/// the repository traits, which lets tests swap in in-memory stores and run
/// without a database.
#[derive(Clone)]
pub struct ServiceContext {
    pool: Option<PgPool>,

    // Repositories
    family_repo: Arc<dyn FamilyRepository>,
    member_repo: Arc<dyn MemberRepository>,
    role_assignment_repo: Arc<dyn RoleAssignmentRepository>,

    // Sources
    invite_codes: Arc<dyn InviteCodeSource>,
    snowflake_generator: Arc<SnowflakeGenerator>,

    jwt_service: Arc<JwtService>,
}

impl ServiceContext {
    // === Database Pool ===

    /// Get the PostgreSQL connection pool, when backed by one
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    // === Repositories ===

    pub fn family_repo(&self) -> &dyn FamilyRepository {
        self.family_repo.as_ref()
    }

    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    pub fn role_assignment_repo(&self) -> &dyn RoleAssignmentRepository {
        self.role_assignment_repo.as_ref()
    }

    // === Sources ===

    /// Where new invite codes come from
    pub fn invite_codes(&self) -> &dyn InviteCodeSource {
        self.invite_codes.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }

    // === Auth ===

    /// Get the JWT verifier
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("repositories", &"...")
            .field("worker_id", &self.snowflake_generator.worker_id())
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    family_repo: Option<Arc<dyn FamilyRepository>>,
    member_repo: Option<Arc<dyn MemberRepository>>,
    role_assignment_repo: Option<Arc<dyn RoleAssignmentRepository>>,
    invite_codes: Option<Arc<dyn InviteCodeSource>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    jwt_service: Option<Arc<JwtService>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn family_repo(mut self, repo: Arc<dyn FamilyRepository>) -> Self {
        self.family_repo = Some(repo);
        self
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn role_assignment_repo(mut self, repo: Arc<dyn RoleAssignmentRepository>) -> Self {
        self.role_assignment_repo = Some(repo);
        self
    }

    /// Defaults to [`RandomInviteCodes`]
    pub fn invite_codes(mut self, source: Arc<dyn InviteCodeSource>) -> Self {
        self.invite_codes = Some(source);
        self
    }

    /// Defaults to a generator for worker 0
    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            pool: self.pool,
            family_repo: self
                .family_repo
                .ok_or_else(|| ServiceError::validation("family_repo is required"))?,
            member_repo: self
                .member_repo
                .ok_or_else(|| ServiceError::validation("member_repo is required"))?,
            role_assignment_repo: self
                .role_assignment_repo
                .ok_or_else(|| ServiceError::validation("role_assignment_repo is required"))?,
            invite_codes: self
                .invite_codes
                .unwrap_or_else(|| Arc::new(RandomInviteCodes)),
            snowflake_generator: self.snowflake_generator.unwrap_or_default(),
            jwt_service: self
                .jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
        })
    }
}
