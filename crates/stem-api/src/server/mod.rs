//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use stem_common::{ApiTokenVerifier, AppConfig, AppError};
use stem_db::{create_pool, PgGenerationRoleRepository, PgMemberRepository, PgTeamRepository};
use stem_discord::DiscordClient;
use stem_service::services::spawn_keepalive;
use stem_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::{apply_middleware, MiddlewareConfig};
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState, middleware: &MiddlewareConfig) -> Router {
    let router = create_router();
    let router = apply_middleware(router, middleware);
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: &AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&config.database)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    let gateway = DiscordClient::new(&config.discord)
        .map_err(|e| AppError::Config(e.to_string()))?;
    info!(guild_id = %gateway.guild_id(), "Discord client ready");

    let managed = config.discord.roles;
    if managed.configured_count() == 0 {
        warn!("No DISCORD_*_ROLE_ID configured; only team and generation roles will be managed");
    }

    let service_context = ServiceContextBuilder::new()
        .member_repo(Arc::new(PgMemberRepository::new(pool.clone())))
        .team_repo(Arc::new(PgTeamRepository::new(pool.clone())))
        .generation_role_repo(Arc::new(PgGenerationRoleRepository::new(pool)))
        .gateway(Arc::new(gateway))
        .managed_roles(managed)
        .sync_config(config.sync)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    let verifier = ApiTokenVerifier::new(&config.auth);
    if !verifier.is_configured() {
        warn!("API_AUTH_TOKEN is not set; every /api request will be refused");
    }

    Ok(AppState::new(service_context, verifier))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address {}: {e}", config.api.address())))?;

    let state = create_app_state(&config).await?;

    let keepalive = config
        .keepalive
        .interval
        .map(|interval| spawn_keepalive(state.service_context().team_repo_arc(), interval));

    let app = create_app(state, &MiddlewareConfig::from_app_config(&config));
    let result = run_server(app, addr).await;

    if let Some(handle) = keepalive {
        handle.abort();
    }

    result
}
