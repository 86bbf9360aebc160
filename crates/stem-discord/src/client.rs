//! Discord REST client bound to one guild

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use stem_common::DiscordConfig;
use stem_core::entities::{GuildMember, GuildRole};
use stem_core::traits::{GuildGateway, RepoResult};
use stem_core::value_objects::Snowflake;

use crate::error::DiscordError;
use crate::models::{ApiErrorBody, ApiGuildMember, ApiRole, CreateRoleBody, ModifyMemberBody};

const USER_AGENT: &str = concat!("DiscordBot (stem-bot, ", env!("CARGO_PKG_VERSION"), ")");

/// Discord REST client
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct DiscordClient {
    http: reqwest::Client,
    base_url: String,
    guild_id: Snowflake,
}

impl DiscordClient {
    /// Build a client from configuration
    pub fn new(config: &DiscordConfig) -> Result<Self, DiscordError> {
        let mut auth = HeaderValue::from_str(&format!("Bot {}", config.token))
            .map_err(|_| DiscordError::Config("bot token contains invalid characters".to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| DiscordError::Config(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            guild_id: config.guild_id,
        })
    }

    /// Guild this client manages
    pub fn guild_id(&self) -> Snowflake {
        self.guild_id
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/guilds/{}{}", self.base_url, self.guild_id, path);
        self.http.request(method, url)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, DiscordError> {
        let resp = builder.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        // Error bodies are best-effort; rate limits and proxies may not send JSON
        let body = resp.text().await.unwrap_or_default();
        let parsed = serde_json::from_str::<ApiErrorBody>(&body).ok();
        let (code, message) = match parsed {
            Some(b) => (b.code, b.message),
            None => (0, body),
        };

        Err(DiscordError::Api {
            status,
            code,
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, DiscordError> {
        let resp = self.send(builder).await?;
        resp.json::<T>().await.map_err(DiscordError::from)
    }
}

impl std::fmt::Debug for DiscordClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordClient")
            .field("base_url", &self.base_url)
            .field("guild_id", &self.guild_id)
            .finish()
    }
}

#[async_trait]
impl GuildGateway for DiscordClient {
    #[instrument(skip(self, user_id), fields(user_id = %user_id))]
    async fn fetch_member(&self, user_id: Snowflake) -> RepoResult<Option<GuildMember>> {
        let builder = self.request(Method::GET, &format!("/members/{user_id}"));
        match self.send_json::<ApiGuildMember>(builder).await {
            Ok(member) => Ok(Some(member.into())),
            Err(e) if e.is_unknown_member() => {
                debug!("User is not in the guild");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn list_roles(&self) -> RepoResult<Vec<GuildRole>> {
        let roles = self
            .send_json::<Vec<ApiRole>>(self.request(Method::GET, "/roles"))
            .await?;
        Ok(roles.into_iter().map(GuildRole::from).collect())
    }

    #[instrument(skip(self))]
    async fn create_role(&self, name: &str) -> RepoResult<GuildRole> {
        let builder = self
            .request(Method::POST, "/roles")
            .json(&CreateRoleBody { name });
        let role = self.send_json::<ApiRole>(builder).await?;
        debug!(role_id = %role.id, "Role created");
        Ok(role.into())
    }

    #[instrument(skip(self, user_id, role_id), fields(user_id = %user_id, role_id = %role_id))]
    async fn add_role(&self, user_id: Snowflake, role_id: Snowflake) -> RepoResult<()> {
        let path = format!("/members/{user_id}/roles/{role_id}");
        self.send(self.request(Method::PUT, &path)).await?;
        Ok(())
    }

    #[instrument(skip(self, user_id, role_id), fields(user_id = %user_id, role_id = %role_id))]
    async fn remove_role(&self, user_id: Snowflake, role_id: Snowflake) -> RepoResult<()> {
        let path = format!("/members/{user_id}/roles/{role_id}");
        self.send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    #[instrument(skip(self, user_id), fields(user_id = %user_id))]
    async fn set_nickname(&self, user_id: Snowflake, nickname: &str) -> RepoResult<()> {
        let builder = self
            .request(Method::PATCH, &format!("/members/{user_id}"))
            .json(&ModifyMemberBody { nick: nickname });
        self.send(builder).await?;
        Ok(())
    }
}
