//! Member entity <-> model mapper

use kinship_core::entities::Member;
use kinship_core::value_objects::Snowflake;

use crate::models::MemberModel;

impl From<MemberModel> for Member {
    fn from(model: MemberModel) -> Self {
        Member {
            user_id: model.user_id,
            family_id: model.family_id.map(Snowflake::new),
            is_admin: model.is_admin,
            display_name: model.display_name,
            joined_at: model.joined_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
