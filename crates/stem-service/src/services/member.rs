//! Member directory service
//!
//! Read-only views joining datastore members with their guild presence.

use std::collections::HashMap;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, instrument, warn};

use stem_core::nickname::extract_name;
use stem_core::value_objects::Snowflake;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Directory entry for a member present in the guild
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberEntry {
    pub discord_uid: Snowflake,
    pub name: String,
}

/// Guild presence of a Discord user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberStatusView {
    pub discord_uid: Snowflake,
    pub is_in_server: bool,
    pub current_nickname: Option<String>,
    /// Role names, `@everyone` excluded
    pub current_roles: Vec<String>,
}

/// Member directory service
pub struct MemberDirectoryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberDirectoryService<'a> {
    /// Create a new MemberDirectoryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List every non-deleted member that is still in the guild
    ///
    /// Members who left the guild, or whose lookup fails, are skipped. Order
    /// follows the datastore (generation descending, then student number).
    #[instrument(skip(self))]
    pub async fn list_members(&self) -> ServiceResult<Vec<MemberEntry>> {
        let members = self.ctx.member_repo().find_active().await?;
        let gateway = self.ctx.gateway();
        let concurrency = self.ctx.sync_config().concurrency.max(1);

        let uids: Vec<Snowflake> = members.iter().map(|m| m.discord_uid).collect();
        let fetched: Vec<_> = stream::iter(uids)
            .map(|uid| async move { (uid, gateway.fetch_member(uid).await) })
            .buffered(concurrency)
            .boxed()
            .collect()
            .await;

        let mut entries = Vec::with_capacity(fetched.len());
        for (discord_uid, result) in fetched {
            match result {
                Ok(Some(guild_member)) => entries.push(MemberEntry {
                    discord_uid,
                    name: extract_name(guild_member.display_name()),
                }),
                Ok(None) => debug!(discord_uid = %discord_uid, "Member not in guild, skipped"),
                Err(e) => warn!(discord_uid = %discord_uid, error = %e, "Member lookup failed, skipped"),
            }
        }

        info!(total = members.len(), listed = entries.len(), "Member directory built");

        Ok(entries)
    }

    /// Guild presence, nickname and role names of one user
    #[instrument(skip(self, discord_uid), fields(discord_uid = %discord_uid))]
    pub async fn member_status(&self, discord_uid: Snowflake) -> ServiceResult<MemberStatusView> {
        let Some(guild_member) = self.ctx.gateway().fetch_member(discord_uid).await? else {
            return Ok(MemberStatusView {
                discord_uid,
                is_in_server: false,
                current_nickname: None,
                current_roles: Vec::new(),
            });
        };

        let names: HashMap<Snowflake, String> = self
            .ctx
            .gateway()
            .list_roles()
            .await?
            .into_iter()
            .filter(|role| !role.is_everyone())
            .map(|role| (role.id, role.name))
            .collect();

        let current_roles = guild_member
            .role_ids
            .iter()
            .filter_map(|id| names.get(id).cloned())
            .collect();

        Ok(MemberStatusView {
            discord_uid,
            is_in_server: true,
            current_nickname: Some(guild_member.nickname_or_username().to_string()),
            current_roles,
        })
    }
}
