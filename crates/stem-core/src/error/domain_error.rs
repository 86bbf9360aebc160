//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Discord member not found: {0}")]
    DiscordMemberNotFound(Snowflake),

    #[error("Member not found in database: {0}")]
    MemberNotFound(Snowflake),

    #[error("Generation role not found: {0}")]
    GenerationRoleNotFound(i32),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid member status: {0}")]
    InvalidStatus(i16),

    #[error("Student number is missing for active member")]
    MissingStudentNumber,

    #[error("Invalid snowflake: {0}")]
    InvalidSnowflake(String),

    #[error("Nickname too long: max {max} characters")]
    NicknameTooLong { max: usize },

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Generation role already exists: {0}")]
    GenerationRoleExists(i32),

    // =========================================================================
    // Upstream Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Discord error: {0}")]
    PlatformError(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::DiscordMemberNotFound(_) => "UNKNOWN_DISCORD_MEMBER",
            Self::MemberNotFound(_) => "UNKNOWN_MEMBER",
            Self::GenerationRoleNotFound(_) => "UNKNOWN_GENERATION_ROLE",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidStatus(_) => "INVALID_STATUS",
            Self::MissingStudentNumber => "MISSING_STUDENT_NUMBER",
            Self::InvalidSnowflake(_) => "INVALID_SNOWFLAKE",
            Self::NicknameTooLong { .. } => "NICKNAME_TOO_LONG",

            // Conflict
            Self::GenerationRoleExists(_) => "GENERATION_ROLE_EXISTS",

            // Upstream
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::PlatformError(_) => "DISCORD_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::DiscordMemberNotFound(_)
                | Self::MemberNotFound(_)
                | Self::GenerationRoleNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidStatus(_)
                | Self::MissingStudentNumber
                | Self::InvalidSnowflake(_)
                | Self::NicknameTooLong { .. }
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::GenerationRoleExists(_))
    }

    /// Check if this is a failure of an external collaborator (database or Discord)
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::DatabaseError(_) | Self::PlatformError(_) | Self::Timeout(_)
        )
    }
}
