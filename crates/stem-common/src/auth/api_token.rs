//! Shared bearer token verification
//!
//! Every `/api` call carries `Authorization: Bearer <token>`; the expected
//! token comes from `API_AUTH_TOKEN`.

use crate::config::AuthConfig;
use crate::error::AppError;

/// Verifies presented bearer tokens against the configured one
#[derive(Clone)]
pub struct ApiTokenVerifier {
    expected: Option<String>,
}

impl ApiTokenVerifier {
    /// Create a verifier from configuration
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            expected: config.api_token.clone(),
        }
    }

    /// Create a verifier for a fixed token
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            expected: Some(token.into()),
        }
    }

    /// Whether a token is configured at all
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.expected.is_some()
    }

    /// Check a presented token
    ///
    /// # Errors
    /// - `Config` if no token is configured (every request is refused)
    /// - `MissingAuth` if no token was presented
    /// - `InvalidToken` if the token does not match
    pub fn verify(&self, presented: Option<&str>) -> Result<(), AppError> {
        let expected = self
            .expected
            .as_deref()
            .ok_or_else(|| AppError::Config("API_AUTH_TOKEN is not configured".to_string()))?;

        let presented = presented.ok_or(AppError::MissingAuth)?;

        if constant_time_eq(expected.as_bytes(), presented.as_bytes()) {
            Ok(())
        } else {
            Err(AppError::InvalidToken)
        }
    }
}

impl std::fmt::Debug for ApiTokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiTokenVerifier")
            .field("configured", &self.is_configured())
            .finish()
    }
}

// Comparison time depends only on the lengths
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
