//! Authentication extractor
//!
//! Checks the shared bearer token from the Authorization header.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use stem_common::AppError;

use crate::response::ApiError;
use crate::state::AppState;

/// Proof that the request carried the configured API token
#[derive(Debug, Clone, Copy)]
pub struct ApiToken;

#[async_trait]
impl<S> FromRequestParts<S> for ApiToken
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let bearer = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .ok();

        let result = match &bearer {
            Some(TypedHeader(Authorization(bearer))) => app_state.verifier().verify(Some(bearer.token())),
            // A header in another scheme is a wrong token, not a missing one
            None if parts.headers.contains_key(AUTHORIZATION) && app_state.verifier().is_configured() => {
                Err(AppError::InvalidToken)
            }
            None => app_state.verifier().verify(None),
        };

        result.map(|()| ApiToken).map_err(|e| {
            tracing::warn!(error = %e, "Rejected API request");
            ApiError::App(e)
        })
    }
}
