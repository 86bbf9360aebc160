//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod generation;
pub mod health;
pub mod members;
pub mod nickname;
pub mod roles;

use crate::response::ApiError;

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::EndpointNotFound
}
