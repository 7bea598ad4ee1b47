//! Family entity <-> model mapper

use kinship_core::entities::Family;
use kinship_core::error::DomainError;
use kinship_core::value_objects::{InviteCode, Snowflake};
use uuid::Uuid;

use crate::models::FamilyModel;

impl TryFrom<FamilyModel> for Family {
    type Error = DomainError;

    fn try_from(model: FamilyModel) -> Result<Self, Self::Error> {
        let invite_code = InviteCode::parse(&model.invite_code).map_err(|e| {
            DomainError::InternalError(format!("family {} has bad invite code: {e}", model.id))
        })?;

        Ok(Family {
            id: Snowflake::new(model.id),
            name: model.family_name,
            invite_code,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Family values for database insertion
pub struct FamilyInsert<'a> {
    pub id: i64,
    pub family_name: &'a str,
    pub invite_code: &'a str,
    pub created_by: Option<Uuid>,
}

impl<'a> FamilyInsert<'a> {
    pub fn new(family: &'a Family) -> Self {
        Self {
            id: family.id.into_inner(),
            family_name: &family.name,
            invite_code: family.invite_code.as_str(),
            created_by: family.created_by,
        }
    }
}
