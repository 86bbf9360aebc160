//! Wire models for the subset of Discord REST payloads the bot consumes

use serde::{Deserialize, Serialize};

use stem_core::entities::{GuildMember, GuildRole};
use stem_core::value_objects::Snowflake;

/// User object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiUser {
    pub id: Snowflake,
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
}

/// Guild member object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiGuildMember {
    pub user: ApiUser,
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default)]
    pub roles: Vec<Snowflake>,
}

impl From<ApiGuildMember> for GuildMember {
    fn from(api: ApiGuildMember) -> Self {
        GuildMember {
            user_id: api.user.id,
            username: api.user.username,
            global_name: api.user.global_name,
            nickname: api.nick,
            role_ids: api.roles,
        }
    }
}

/// Role object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiRole {
    pub id: Snowflake,
    pub name: String,
}

impl From<ApiRole> for GuildRole {
    fn from(api: ApiRole) -> Self {
        GuildRole::new(api.id, api.name)
    }
}

/// JSON error body
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateRoleBody<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ModifyMemberBody<'a> {
    pub nick: &'a str,
}
