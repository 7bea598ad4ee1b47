//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use kinship_core::entities::Member;
use kinship_core::error::DomainError;
use kinship_core::traits::{MemberRepository, RepoResult};
use kinship_core::value_objects::Snowflake;

use crate::models::MemberModel;

use super::error::map_db_error;

/// Create-or-attach, guarded on the stored family being empty
///
/// Returns no row when the user already belongs to a family. Under READ
/// COMMITTED a concurrent attach for the same user blocks on the row and then
/// re-checks the guard against the committed version.
pub(crate) const ATTACH_MEMBER_SQL: &str = r#"
    INSERT INTO members (user_id, family_id, is_admin, joined_at, created_at, updated_at)
    VALUES ($1, $2, $3, NOW(), NOW(), NOW())
    ON CONFLICT (user_id) DO UPDATE
    SET family_id = EXCLUDED.family_id,
        is_admin = EXCLUDED.is_admin,
        joined_at = EXCLUDED.joined_at,
        updated_at = NOW()
    WHERE members.family_id IS NULL
    RETURNING user_id, family_id, is_admin, display_name, joined_at, created_at, updated_at
"#;

/// PostgreSQL implementation of MemberRepository
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    /// Create a new PgMemberRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Uuid) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(
            r#"
            SELECT user_id, family_id, is_admin, display_name, joined_at, created_at, updated_at
            FROM members
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Member::from))
    }

    #[instrument(skip(self))]
    async fn find_by_family(&self, family_id: Snowflake) -> RepoResult<Vec<Member>> {
        let results = sqlx::query_as::<_, MemberModel>(
            r#"
            SELECT user_id, family_id, is_admin, display_name, joined_at, created_at, updated_at
            FROM members
            WHERE family_id = $1
            ORDER BY joined_at ASC, user_id ASC
            "#,
        )
        .bind(family_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Member::from).collect())
    }

    #[instrument(skip(self))]
    async fn attach(
        &self,
        user_id: Uuid,
        family_id: Snowflake,
        is_admin: bool,
    ) -> RepoResult<Member> {
        sqlx::query_as::<_, MemberModel>(ATTACH_MEMBER_SQL)
            .bind(user_id)
            .bind(family_id.into_inner())
            .bind(is_admin)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?
            .map(Member::from)
            .ok_or(DomainError::AlreadyMember)
    }
}
