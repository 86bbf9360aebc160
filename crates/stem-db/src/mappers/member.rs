//! Member entity <-> model mapper

use stem_core::entities::{InvalidMemberRow, Member, MemberRecord, MemberStatus};
use stem_core::error::DomainError;

use crate::models::MemberModel;

use super::parse_snowflake;

/// Convert a members row to the entity
///
/// Fails on a status code outside the known range or a malformed Discord id.
impl TryFrom<MemberModel> for Member {
    type Error = DomainError;

    fn try_from(model: MemberModel) -> Result<Self, Self::Error> {
        Ok(Member {
            id: model.supabase_auth_user_id,
            status: MemberStatus::try_from(model.status)?,
            generation: model.generation,
            student_number: model.student_number,
            discord_uid: parse_snowflake(&model.discord_uid)?,
            avatar_url: model.avatar_url,
            is_admin: model.is_admin,
            joined_at: model.joined_at,
            deleted_at: model.deleted_at,
        })
    }
}

/// Convert a members row, keeping the stored Discord id when it does not map
pub fn member_record(model: MemberModel) -> MemberRecord {
    let discord_uid = model.discord_uid.clone();
    Member::try_from(model).map_err(|error| InvalidMemberRow { discord_uid, error })
}
