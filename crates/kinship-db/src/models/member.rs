//! Member database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for members table
#[derive(Debug, Clone, FromRow)]
pub struct MemberModel {
    pub user_id: Uuid,
    pub family_id: Option<i64>,
    pub is_admin: bool,
    pub display_name: Option<String>,
    pub joined_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
