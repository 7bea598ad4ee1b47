//! Family database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for families table
#[derive(Debug, Clone, FromRow)]
pub struct FamilyModel {
    pub id: i64,
    pub family_name: String,
    pub invite_code: String,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
