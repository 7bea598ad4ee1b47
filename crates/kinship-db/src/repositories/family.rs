//! PostgreSQL implementation of FamilyRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use kinship_core::entities::{Family, Member};
use kinship_core::error::DomainError;
use kinship_core::traits::{FamilyRepository, RepoResult};
use kinship_core::value_objects::{InviteCode, Snowflake};

use crate::mappers::FamilyInsert;
use crate::models::{FamilyModel, MemberModel};

use super::error::{map_db_error, map_family_insert_error};
use super::member::ATTACH_MEMBER_SQL;

const INSERT_FAMILY_SQL: &str = r#"
    INSERT INTO families (id, family_name, invite_code, created_by, created_at, updated_at)
    VALUES ($1, $2, $3, $4, $5, $6)
"#;

/// PostgreSQL implementation of FamilyRepository
#[derive(Clone)]
pub struct PgFamilyRepository {
    pool: PgPool,
}

impl PgFamilyRepository {
    /// Create a new PgFamilyRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FamilyRepository for PgFamilyRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Family>> {
        let result = sqlx::query_as::<_, FamilyModel>(
            r#"
            SELECT id, family_name, invite_code, created_by, created_at, updated_at
            FROM families
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Family::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_invite_code(&self, code: &InviteCode) -> RepoResult<Option<Family>> {
        let result = sqlx::query_as::<_, FamilyModel>(
            r#"
            SELECT id, family_name, invite_code, created_by, created_at, updated_at
            FROM families
            WHERE invite_code = $1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Family::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn invite_code_exists(&self, code: &InviteCode) -> RepoResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM families WHERE invite_code = $1)")
                .bind(code.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(exists)
    }

    #[instrument(skip(self, family), fields(family_id = %family.id))]
    async fn create(&self, family: &Family) -> RepoResult<()> {
        let insert = FamilyInsert::new(family);

        sqlx::query(INSERT_FAMILY_SQL)
            .bind(insert.id)
            .bind(insert.family_name)
            .bind(insert.invite_code)
            .bind(insert.created_by)
            .bind(family.created_at)
            .bind(family.updated_at)
            .execute(&self.pool)
            .await
            .map_err(map_family_insert_error)?;

        Ok(())
    }

    #[instrument(skip(self, family), fields(family_id = %family.id))]
    async fn create_with_founder(&self, family: &Family) -> RepoResult<Member> {
        let founder = family.created_by.ok_or_else(|| {
            DomainError::InternalError("family has no creator to attach".to_string())
        })?;
        let insert = FamilyInsert::new(family);

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(INSERT_FAMILY_SQL)
            .bind(insert.id)
            .bind(insert.family_name)
            .bind(insert.invite_code)
            .bind(insert.created_by)
            .bind(family.created_at)
            .bind(family.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(map_family_insert_error)?;

        let member = sqlx::query_as::<_, MemberModel>(ATTACH_MEMBER_SQL)
            .bind(founder)
            .bind(insert.id)
            .bind(true)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?;

        // Founder joined another family meanwhile
        let Some(member) = member else {
            tx.rollback().await.map_err(map_db_error)?;
            return Err(DomainError::AlreadyMember);
        };

        tx.commit().await.map_err(map_db_error)?;

        Ok(Member::from(member))
    }
}
