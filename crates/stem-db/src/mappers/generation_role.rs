//! GenerationRole entity <-> model mapper

use stem_core::entities::GenerationRole;
use stem_core::error::DomainError;

use crate::models::GenerationRoleModel;

use super::parse_snowflake;

impl TryFrom<GenerationRoleModel> for GenerationRole {
    type Error = DomainError;

    fn try_from(model: GenerationRoleModel) -> Result<Self, Self::Error> {
        Ok(GenerationRole {
            generation: model.generation,
            discord_role_id: parse_snowflake(&model.discord_role_id)?,
        })
    }
}

/// Values for inserting a generation role
pub struct GenerationRoleInsert {
    pub generation: i32,
    pub discord_role_id: String,
}

impl GenerationRoleInsert {
    pub fn new(role: &GenerationRole) -> Self {
        Self {
            generation: role.generation,
            discord_role_id: role.discord_role_id.to_string(),
        }
    }
}
