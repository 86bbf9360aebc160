//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod context;
pub mod error;
pub mod generation;
pub mod keepalive;
pub mod member;
pub mod nickname;
pub mod role_sync;

// Re-export all services for convenience
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use generation::GenerationService;
pub use keepalive::{run_once as keepalive_once, spawn_keepalive};
pub use member::{MemberDirectoryService, MemberEntry, MemberStatusView};
pub use nickname::{NicknameService, NicknameView};
pub use role_sync::{
    BulkSyncReport, FailedRoleChange, MemberSyncError, RoleCatalogData, RoleSyncReport,
    RoleSyncService,
};
