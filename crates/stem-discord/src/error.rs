//! Discord client errors

use reqwest::StatusCode;

use stem_core::error::DomainError;

/// JSON error code for an unknown guild member
pub const UNKNOWN_MEMBER: u32 = 10007;
/// JSON error code for an unknown user
pub const UNKNOWN_USER: u32 = 10013;

/// Errors raised while talking to Discord
#[derive(Debug, thiserror::Error)]
pub enum DiscordError {
    #[error("invalid client configuration: {0}")]
    Config(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("{status} {message} (code {code})")]
    Api {
        status: StatusCode,
        code: u32,
        message: String,
    },

    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl DiscordError {
    /// Whether the error says the user is not a member of the guild
    pub fn is_unknown_member(&self) -> bool {
        matches!(
            self,
            Self::Api { status, code, .. }
                if *status == StatusCode::NOT_FOUND && matches!(*code, UNKNOWN_MEMBER | UNKNOWN_USER)
        )
    }
}

impl From<reqwest::Error> for DiscordError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e.to_string())
        } else if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

impl From<DiscordError> for DomainError {
    fn from(e: DiscordError) -> Self {
        match e {
            DiscordError::Timeout(msg) => DomainError::Timeout(format!("Discord: {msg}")),
            other => DomainError::PlatformError(other.to_string()),
        }
    }
}
