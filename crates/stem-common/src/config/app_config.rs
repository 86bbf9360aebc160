//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use stem_core::{ManagedRoleIds, Snowflake};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub discord: DiscordConfig,
    pub auth: AuthConfig,
    pub sync: SyncConfig,
    pub keepalive: KeepAliveConfig,
    pub cors: CorsConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Discord bot configuration
#[derive(Debug, Clone)]
pub struct DiscordConfig {
    /// Bot token (without the `Bot ` prefix)
    pub token: String,
    /// Guild whose roles and nicknames are managed
    pub guild_id: Snowflake,
    /// REST API base URL
    pub api_base_url: String,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Role ids of the fixed role categories
    pub roles: ManagedRoleIds,
}

/// API authentication configuration
#[derive(Clone, Default)]
pub struct AuthConfig {
    /// Shared bearer token; when unset every authenticated request is refused
    pub api_token: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("api_token", &self.api_token.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Bulk role sync configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncConfig {
    /// Members synced at the same time (1 = sequential)
    pub concurrency: usize,
    /// Upper bound for one member's sync
    pub member_timeout: Duration,
    /// Upper bound for a whole bulk sync
    pub batch_timeout: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            concurrency: default_sync_concurrency(),
            member_timeout: Duration::from_secs(default_member_timeout_secs()),
            batch_timeout: Duration::from_secs(default_batch_timeout_secs()),
        }
    }
}

/// Database keep-alive configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeepAliveConfig {
    /// Interval between keep-alive queries; `None` disables the task
    pub interval: Option<Duration>,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "stem-bot".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_connections() -> u32 {
    5
}

fn default_min_connections() -> u32 {
    1
}

fn default_discord_api_base_url() -> String {
    "https://discord.com/api/v10".to_string()
}

fn default_discord_timeout_secs() -> u64 {
    15
}

fn default_sync_concurrency() -> usize {
    1
}

fn default_member_timeout_secs() -> u64 {
    30
}

fn default_batch_timeout_secs() -> u64 {
    600
}

fn default_keepalive_interval_secs() -> u64 {
    6 * 60 * 60 // 6 hours
}

/// Read a variable, treating empty values as unset
fn var(name: &'static str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    var(name).ok_or(ConfigError::MissingVar(name))
}

fn parsed<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    var(name)
        .map(|raw| {
            raw.parse()
                .map_err(|_| ConfigError::InvalidValue(name, raw.clone()))
        })
        .transpose()
}

fn role_id(name: &'static str) -> Result<Option<Snowflake>, ConfigError> {
    var(name)
        .map(|raw| Snowflake::parse(&raw).map_err(|_| ConfigError::InvalidValue(name, raw.clone())))
        .transpose()
}

// Role ids from `DISCORD_*_ROLE_ID`; an unset or empty variable disables the category
fn managed_roles() -> Result<ManagedRoleIds, ConfigError> {
    Ok(ManagedRoleIds {
        leader: role_id("DISCORD_LEADER_ROLE_ID")?,
        junior: role_id("DISCORD_JH_ROLE_ID")?,
        senior: role_id("DISCORD_H_ROLE_ID")?,
        alumnus: role_id("DISCORD_OB_ROLE_ID")?,
        member: role_id("DISCORD_MEMBER_ROLE_ID")?,
        verified: role_id("DISCORD_VERIFIED_ROLE_ID")?,
    })
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let guild_raw = required("DISCORD_GUILD_ID")?;
        let guild_id = Snowflake::parse(&guild_raw)
            .map_err(|_| ConfigError::InvalidValue("DISCORD_GUILD_ID", guild_raw.clone()))?;

        let concurrency = parsed::<usize>("SYNC_CONCURRENCY")?.unwrap_or_else(default_sync_concurrency);
        if concurrency == 0 {
            return Err(ConfigError::InvalidValue("SYNC_CONCURRENCY", "0".to_string()));
        }

        let keepalive_secs =
            parsed::<u64>("KEEPALIVE_INTERVAL_SECS")?.unwrap_or_else(default_keepalive_interval_secs);

        Ok(Self {
            app: AppSettings {
                name: var("APP_NAME").unwrap_or_else(default_app_name),
                env: var("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: var("API_HOST").unwrap_or_else(default_host),
                port: parsed("PORT")?.unwrap_or_else(default_port),
            },
            database: DatabaseConfig {
                url: required("DATABASE_URL")?,
                max_connections: parsed("DATABASE_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_max_connections),
                min_connections: parsed("DATABASE_MIN_CONNECTIONS")?
                    .unwrap_or_else(default_min_connections),
            },
            discord: DiscordConfig {
                token: required("DISCORD_TOKEN")?,
                guild_id,
                api_base_url: var("DISCORD_API_BASE_URL")
                    .unwrap_or_else(default_discord_api_base_url),
                request_timeout: Duration::from_secs(
                    parsed("DISCORD_REQUEST_TIMEOUT_SECS")?
                        .unwrap_or_else(default_discord_timeout_secs),
                ),
                roles: managed_roles()?,
            },
            auth: AuthConfig {
                api_token: var("API_AUTH_TOKEN"),
            },
            sync: SyncConfig {
                concurrency,
                member_timeout: Duration::from_secs(
                    parsed("SYNC_MEMBER_TIMEOUT_SECS")?.unwrap_or_else(default_member_timeout_secs),
                ),
                batch_timeout: Duration::from_secs(
                    parsed("SYNC_BATCH_TIMEOUT_SECS")?.unwrap_or_else(default_batch_timeout_secs),
                ),
            },
            keepalive: KeepAliveConfig {
                interval: (keepalive_secs > 0).then(|| Duration::from_secs(keepalive_secs)),
            },
            cors: CorsConfig {
                allowed_origins: var("CORS_ALLOWED_ORIGINS")
                    .map(|s| s.split(',').map(str::trim).map(String::from).collect())
                    .unwrap_or_default(),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
