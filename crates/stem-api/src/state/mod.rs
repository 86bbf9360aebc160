//! Application state
//!
//! Holds the shared state for the Axum application: the service context
//! and the API token verifier.

use std::sync::Arc;

use stem_common::ApiTokenVerifier;
use stem_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Bearer token check for `/api/*`
    verifier: Arc<ApiTokenVerifier>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(service_context: ServiceContext, verifier: ApiTokenVerifier) -> Self {
        Self {
            service_context: Arc::new(service_context),
            verifier: Arc::new(verifier),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the API token verifier
    pub fn verifier(&self) -> &ApiTokenVerifier {
        &self.verifier
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("verifier", &self.verifier)
            .finish()
    }
}
