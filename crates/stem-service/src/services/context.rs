//! Service context - dependency container for services
//!
//! Holds the repositories, the Discord gateway and the sync settings.

use std::sync::Arc;

use stem_common::SyncConfig;
use stem_core::traits::{GenerationRoleRepository, GuildGateway, MemberRepository, TeamRepository};
use stem_core::ManagedRoleIds;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cheap to clone; every dependency sits behind an `Arc`.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    member_repo: Arc<dyn MemberRepository>,
    team_repo: Arc<dyn TeamRepository>,
    generation_role_repo: Arc<dyn GenerationRoleRepository>,

    // Discord
    gateway: Arc<dyn GuildGateway>,

    // Settings
    managed_roles: ManagedRoleIds,
    sync: SyncConfig,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    /// Get the member repository
    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    /// Get the team repository
    pub fn team_repo(&self) -> &dyn TeamRepository {
        self.team_repo.as_ref()
    }

    /// Shared handle to the team repository (for background tasks)
    pub fn team_repo_arc(&self) -> Arc<dyn TeamRepository> {
        Arc::clone(&self.team_repo)
    }

    /// Get the generation role repository
    pub fn generation_role_repo(&self) -> &dyn GenerationRoleRepository {
        self.generation_role_repo.as_ref()
    }

    // === Discord ===

    /// Get the guild gateway
    pub fn gateway(&self) -> &dyn GuildGateway {
        self.gateway.as_ref()
    }

    // === Settings ===

    /// Role ids of the fixed role categories
    pub fn managed_roles(&self) -> &ManagedRoleIds {
        &self.managed_roles
    }

    /// Bulk sync settings
    pub fn sync_config(&self) -> &SyncConfig {
        &self.sync
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("gateway", &"...")
            .field("managed_roles", &self.managed_roles)
            .field("sync", &self.sync)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    member_repo: Option<Arc<dyn MemberRepository>>,
    team_repo: Option<Arc<dyn TeamRepository>>,
    generation_role_repo: Option<Arc<dyn GenerationRoleRepository>>,
    gateway: Option<Arc<dyn GuildGateway>>,
    managed_roles: ManagedRoleIds,
    sync: SyncConfig,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn team_repo(mut self, repo: Arc<dyn TeamRepository>) -> Self {
        self.team_repo = Some(repo);
        self
    }

    pub fn generation_role_repo(mut self, repo: Arc<dyn GenerationRoleRepository>) -> Self {
        self.generation_role_repo = Some(repo);
        self
    }

    pub fn gateway(mut self, gateway: Arc<dyn GuildGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    pub fn managed_roles(mut self, roles: ManagedRoleIds) -> Self {
        self.managed_roles = roles;
        self
    }

    pub fn sync_config(mut self, sync: SyncConfig) -> Self {
        self.sync = sync;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns an internal error if a repository or the gateway is missing.
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            member_repo: self
                .member_repo
                .ok_or_else(|| ServiceError::internal("member_repo is required"))?,
            team_repo: self
                .team_repo
                .ok_or_else(|| ServiceError::internal("team_repo is required"))?,
            generation_role_repo: self
                .generation_role_repo
                .ok_or_else(|| ServiceError::internal("generation_role_repo is required"))?,
            gateway: self
                .gateway
                .ok_or_else(|| ServiceError::internal("gateway is required"))?,
            managed_roles: self.managed_roles,
            // A zero bound would stall the bulk sync stream
            sync: SyncConfig {
                concurrency: self.sync.concurrency.max(1),
                ..self.sync
            },
        })
    }
}
