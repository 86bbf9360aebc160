//! Application error types
//!
//! Errors raised outside the domain (auth, config, startup) plus the wrapped
//! domain error, with their HTTP status and code.

use serde::Serialize;
use stem_core::DomainError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Missing authentication")]
    MissingAuth,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Validation error: {0}")]
    Validation(String),

    /// Pool creation or other datastore setup failure
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Required setting unset or invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::MissingAuth | Self::InvalidToken => 401,
            Self::Database(_) | Self::Internal(_) | Self::Config(_) => 500,
            Self::Domain(e) => Self::domain_status(e),
        }
    }

    /// HTTP status code for a domain error
    ///
    /// Discord failures and timeouts are 502; datastore failures stay 500.
    #[must_use]
    pub fn domain_status(e: &DomainError) -> u16 {
        match e {
            DomainError::PlatformError(_) | DomainError::Timeout(_) => 502,
            e if e.is_not_found() => 404,
            e if e.is_validation() => 400,
            e if e.is_conflict() => 409,
            _ => 500,
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingAuth => "MISSING_AUTH",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }
}

/// Error body returned by the HTTP API
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,
    pub error: String,
    pub code: String,
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
