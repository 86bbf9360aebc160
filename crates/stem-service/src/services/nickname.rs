//! Nickname service
//!
//! Reads and rewrites guild nicknames in the `名前(学籍番号)` / `名前(N期卒業生)` form.

use tracing::{info, instrument};

use stem_core::entities::GuildMember;
use stem_core::error::DomainError;
use stem_core::nickname::{extract_name, format_member_nickname};
use stem_core::value_objects::Snowflake;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// A member's current nickname
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NicknameView {
    pub discord_uid: Snowflake,
    /// Guild nickname, or the username when none is set
    pub full_nickname: String,
    /// Name part without the parenthesized suffix
    pub name_only: String,
}

/// Nickname service
pub struct NicknameService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NicknameService<'a> {
    /// Create a new NicknameService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Current nickname of a guild member
    #[instrument(skip(self, discord_uid), fields(discord_uid = %discord_uid))]
    pub async fn get_nickname(&self, discord_uid: Snowflake) -> ServiceResult<NicknameView> {
        let guild_member = self.fetch_guild_member(discord_uid).await?;
        let full_nickname = guild_member.nickname_or_username().to_string();
        let name_only = extract_name(&full_nickname);

        Ok(NicknameView {
            discord_uid,
            full_nickname,
            name_only,
        })
    }

    /// Set the canonical nickname for `name` and return it
    #[instrument(skip(self, discord_uid, name), fields(discord_uid = %discord_uid))]
    pub async fn update_nickname(&self, discord_uid: Snowflake, name: &str) -> ServiceResult<String> {
        self.fetch_guild_member(discord_uid).await?;

        let member = self
            .ctx
            .member_repo()
            .find_by_discord_uid(discord_uid)
            .await?
            .ok_or(DomainError::MemberNotFound(discord_uid))?;

        let nickname = format_member_nickname(name, &member)?;
        self.ctx.gateway().set_nickname(discord_uid, &nickname).await?;

        info!(nickname = %nickname, "Nickname updated");

        Ok(nickname)
    }

    async fn fetch_guild_member(&self, discord_uid: Snowflake) -> ServiceResult<GuildMember> {
        Ok(self
            .ctx
            .gateway()
            .fetch_member(discord_uid)
            .await?
            .ok_or(DomainError::DiscordMemberNotFound(discord_uid))?)
    }
}
