//! Role assignment database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for role_assignments table
#[derive(Debug, Clone, FromRow)]
pub struct RoleAssignmentModel {
    pub id: i64,
    pub user_id: Uuid,
    pub family_id: i64,
    pub role_kind: String,
    pub assigned_date: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
