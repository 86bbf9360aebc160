//! Team entity <-> model mapper

use stem_core::entities::Team;
use stem_core::error::DomainError;

use crate::models::TeamModel;

use super::parse_snowflake;

impl TryFrom<TeamModel> for Team {
    type Error = DomainError;

    fn try_from(model: TeamModel) -> Result<Self, Self::Error> {
        Ok(Team {
            id: model.id,
            name: model.name,
            discord_role_id: parse_snowflake(&model.discord_role_id)?,
        })
    }
}

