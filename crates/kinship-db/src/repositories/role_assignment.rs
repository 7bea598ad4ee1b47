//! PostgreSQL implementation of RoleAssignmentRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use kinship_core::entities::RoleAssignment;
use kinship_core::traits::{RepoResult, RoleAssignmentRepository};
use kinship_core::value_objects::{RoleKind, Snowflake};

use crate::mappers::RoleAssignmentInsert;
use crate::models::RoleAssignmentModel;

use super::error::{map_assignment_insert_error, map_db_error};

/// PostgreSQL implementation of RoleAssignmentRepository
#[derive(Clone)]
pub struct PgRoleAssignmentRepository {
    pool: PgPool,
}

impl PgRoleAssignmentRepository {
    /// Create a new PgRoleAssignmentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_entities(rows: Vec<RoleAssignmentModel>) -> RepoResult<Vec<RoleAssignment>> {
    rows.into_iter().map(RoleAssignment::try_from).collect()
}

#[async_trait]
impl RoleAssignmentRepository for PgRoleAssignmentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<RoleAssignment>> {
        let result = sqlx::query_as::<_, RoleAssignmentModel>(
            r#"
            SELECT id, user_id, family_id, role_kind, assigned_date, status, created_at, updated_at
            FROM role_assignments
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(RoleAssignment::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_active_for_family(
        &self,
        family_id: Snowflake,
        date: NaiveDate,
    ) -> RepoResult<Vec<RoleAssignment>> {
        // Snowflake ids are time-ordered, so this is creation order
        let results = sqlx::query_as::<_, RoleAssignmentModel>(
            r#"
            SELECT id, user_id, family_id, role_kind, assigned_date, status, created_at, updated_at
            FROM role_assignments
            WHERE family_id = $1 AND assigned_date = $2 AND status = 'active'
            ORDER BY id ASC
            "#,
        )
        .bind(family_id.into_inner())
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_entities(results)
    }

    #[instrument(skip(self))]
    async fn find_active_for_user(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> RepoResult<Option<RoleAssignment>> {
        let result = sqlx::query_as::<_, RoleAssignmentModel>(
            r#"
            SELECT id, user_id, family_id, role_kind, assigned_date, status, created_at, updated_at
            FROM role_assignments
            WHERE user_id = $1 AND assigned_date = $2 AND status = 'active'
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(RoleAssignment::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_active_holder(
        &self,
        family_id: Snowflake,
        role: RoleKind,
        date: NaiveDate,
    ) -> RepoResult<Option<RoleAssignment>> {
        let result = sqlx::query_as::<_, RoleAssignmentModel>(
            r#"
            SELECT id, user_id, family_id, role_kind, assigned_date, status, created_at, updated_at
            FROM role_assignments
            WHERE family_id = $1 AND role_kind = $2 AND assigned_date = $3 AND status = 'active'
            "#,
        )
        .bind(family_id.into_inner())
        .bind(role.as_str())
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(RoleAssignment::try_from).transpose()
    }

    #[instrument(skip(self, assignment), fields(assignment_id = %assignment.id, role = %assignment.role))]
    async fn activate(&self, assignment: &RoleAssignment) -> RepoResult<()> {
        let insert = RoleAssignmentInsert::new(assignment);

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            UPDATE role_assignments
            SET status = 'superseded', updated_at = NOW()
            WHERE user_id = $1 AND assigned_date = $2 AND status = 'active'
            "#,
        )
        .bind(insert.user_id)
        .bind(insert.assigned_date)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO role_assignments
                (id, user_id, family_id, role_kind, assigned_date, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(insert.id)
        .bind(insert.user_id)
        .bind(insert.family_id)
        .bind(insert.role_kind)
        .bind(insert.assigned_date)
        .bind(insert.status)
        .bind(assignment.created_at)
        .bind(assignment.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_assignment_insert_error(e, assignment.role))?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn release(&self, id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE role_assignments
            SET status = 'released', updated_at = NOW()
            WHERE id = $1 AND status = 'active'
            "#,
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
