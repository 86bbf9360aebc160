//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;
use stem_core::Snowflake;

// ============================================================================
// Role Sync Responses
// ============================================================================

/// A role change Discord rejected
#[derive(Debug, Clone, Serialize)]
pub struct FailedRoleResponse {
    pub role_id: Snowflake,
    pub role: String,
    /// `add` or `remove`
    pub action: &'static str,
    pub error: String,
}

/// Single-member sync result
#[derive(Debug, Clone, Serialize)]
pub struct RoleSyncResponse {
    /// False when at least one role change failed
    pub success: bool,
    pub roles_assigned: Vec<String>,
    pub roles_removed: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub roles_failed: Vec<FailedRoleResponse>,
}

/// Per-member error of a bulk sync
#[derive(Debug, Clone, Serialize)]
pub struct MemberSyncErrorResponse {
    pub discord_uid: String,
    pub error: String,
}

/// Bulk sync result
#[derive(Debug, Clone, Serialize)]
pub struct BulkSyncResponse {
    pub success: bool,
    pub synced: usize,
    pub failed: usize,
    pub total: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<MemberSyncErrorResponse>,
}

// ============================================================================
// Nickname Responses
// ============================================================================

/// Current nickname
#[derive(Debug, Clone, Serialize)]
pub struct NicknameResponse {
    pub discord_uid: Snowflake,
    pub full_nickname: String,
    pub name_only: String,
}

/// Nickname update result
#[derive(Debug, Clone, Serialize)]
pub struct NicknameUpdateResponse {
    pub success: bool,
    pub name: String,
    pub updated_nickname: String,
}

// ============================================================================
// Generation Responses
// ============================================================================

/// Created generation role
#[derive(Debug, Clone, Serialize)]
pub struct GenerationResponse {
    pub success: bool,
    pub role_id: Snowflake,
    pub generation: i32,
}

// ============================================================================
// Member Responses
// ============================================================================

/// Guild presence of a user
#[derive(Debug, Clone, Serialize)]
pub struct MemberStatusResponse {
    pub discord_uid: Snowflake,
    pub is_in_server: bool,
    pub current_nickname: Option<String>,
    pub current_roles: Vec<String>,
}

/// Member directory entry
#[derive(Debug, Clone, Serialize)]
pub struct MemberSummary {
    pub uid: Snowflake,
    pub name: String,
}

/// Member directory
#[derive(Debug, Clone, Serialize)]
pub struct MembersResponse {
    pub success: bool,
    pub data: Vec<MemberSummary>,
}

// ============================================================================
// Health Check Responses
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
        }
    }
}
