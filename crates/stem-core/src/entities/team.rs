//! Team entity - a sub-group (班) with its own Discord role

use uuid::Uuid;

use crate::value_objects::Snowflake;

/// Team entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub discord_role_id: Snowflake,
}

impl Team {
    /// Create a new Team
    pub fn new(id: Uuid, name: impl Into<String>, discord_role_id: Snowflake) -> Self {
        Self {
            id,
            name: name.into(),
            discord_role_id,
        }
    }
}

/// Marks a member as the leader (班長) of a team
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamLeader {
    pub team_id: Uuid,
    pub member_id: Uuid,
}
