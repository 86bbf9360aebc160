//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Missing fields deserialize to their empty value so validation, not serde,
//! reports them.

use std::borrow::Cow;

use serde::Deserialize;
use stem_core::Snowflake;
use validator::{Validate, ValidationError};

/// Reject ids that are not a non-zero decimal snowflake
fn validate_snowflake(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed("discord_uid is required")));
    }
    Snowflake::parse(value).map(|_| ()).map_err(|e| {
        ValidationError::new("snowflake").with_message(Cow::Owned(format!("discord_uid: {e}")))
    })
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed("name is required")));
    }
    Ok(())
}

/// Parse an id already accepted by `validate_snowflake`
fn parse_uid(value: &str) -> Snowflake {
    Snowflake::parse(value).unwrap_or_default()
}

// ============================================================================
// Role Sync Requests
// ============================================================================

/// Sync one member's roles
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SyncMemberRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_snowflake"))]
    pub discord_uid: String,
}

impl SyncMemberRequest {
    /// Parsed id; call after validation
    pub fn uid(&self) -> Snowflake {
        parse_uid(&self.discord_uid)
    }
}

// ============================================================================
// Nickname Requests
// ============================================================================

/// Set a member's canonical nickname
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateNicknameRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_snowflake"))]
    pub discord_uid: String,

    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
}

impl UpdateNicknameRequest {
    /// Parsed id; call after validation
    pub fn uid(&self) -> Snowflake {
        parse_uid(&self.discord_uid)
    }
}

/// `?discord_uid=` query used by read endpoints
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct DiscordUidQuery {
    #[serde(default)]
    #[validate(custom(function = "validate_snowflake"))]
    pub discord_uid: String,
}

impl DiscordUidQuery {
    /// Parsed id; call after validation
    pub fn uid(&self) -> Snowflake {
        parse_uid(&self.discord_uid)
    }
}

// ============================================================================
// Generation Requests
// ============================================================================

/// Create the role for a new generation
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateGenerationRequest {
    #[serde(default)]
    #[validate(range(min = 1, message = "generation must be a positive integer"))]
    pub generation: i32,
}
