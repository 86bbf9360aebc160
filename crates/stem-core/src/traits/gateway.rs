//! Guild gateway trait (port) - the operations the service needs from Discord

use async_trait::async_trait;

use crate::entities::{GuildMember, GuildRole};
use crate::traits::RepoResult;
use crate::value_objects::Snowflake;

/// Access to a single Discord guild
///
/// Implementations are constructed explicitly at startup and shared by reference.
#[async_trait]
pub trait GuildGateway: Send + Sync {
    /// Fetch a member of the guild, `None` if the user is not in it
    async fn fetch_member(&self, user_id: Snowflake) -> RepoResult<Option<GuildMember>>;

    /// List the guild's roles
    async fn list_roles(&self) -> RepoResult<Vec<GuildRole>>;

    /// Create a role with the given name
    async fn create_role(&self, name: &str) -> RepoResult<GuildRole>;

    /// Grant a role to a member
    async fn add_role(&self, user_id: Snowflake, role_id: Snowflake) -> RepoResult<()>;

    /// Revoke a role from a member
    async fn remove_role(&self, user_id: Snowflake, role_id: Snowflake) -> RepoResult<()>;

    /// Set a member's guild nickname
    async fn set_nickname(&self, user_id: Snowflake, nickname: &str) -> RepoResult<()>;
}
