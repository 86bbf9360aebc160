//! Guild member - a user's presence in the Discord guild, as seen by the platform

use std::collections::HashSet;

use crate::value_objects::Snowflake;

/// Guild member as returned by the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildMember {
    pub user_id: Snowflake,
    pub username: String,
    pub global_name: Option<String>,
    pub nickname: Option<String>,
    pub role_ids: Vec<Snowflake>,
}

impl GuildMember {
    /// Create a new GuildMember without nickname or roles
    pub fn new(user_id: Snowflake, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
            global_name: None,
            nickname: None,
            role_ids: Vec::new(),
        }
    }

    /// Guild nickname, falling back to the account username
    pub fn nickname_or_username(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.username)
    }

    /// Name shown in the member list: nickname, then global display name, then username
    pub fn display_name(&self) -> &str {
        self.nickname
            .as_deref()
            .or(self.global_name.as_deref())
            .unwrap_or(&self.username)
    }

    /// Check if member has a specific role
    #[inline]
    pub fn has_role(&self, role_id: Snowflake) -> bool {
        self.role_ids.contains(&role_id)
    }

    /// Current roles as a set
    pub fn role_set(&self) -> HashSet<Snowflake> {
        self.role_ids.iter().copied().collect()
    }
}

/// Guild role as returned by the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildRole {
    pub id: Snowflake,
    pub name: String,
}

impl GuildRole {
    /// Name Discord gives the implicit role every member holds
    pub const EVERYONE: &'static str = "@everyone";

    /// Create a new GuildRole
    pub fn new(id: Snowflake, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Check if this is the implicit @everyone role
    pub fn is_everyone(&self) -> bool {
        self.name == Self::EVERYONE
    }
}
