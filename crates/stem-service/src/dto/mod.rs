//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting service results to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{CreateGenerationRequest, DiscordUidQuery, SyncMemberRequest, UpdateNicknameRequest};

pub use responses::{
    BulkSyncResponse, FailedRoleResponse, GenerationResponse, HealthResponse, MemberStatusResponse,
    MemberSummary, MemberSyncErrorResponse, MembersResponse, NicknameResponse,
    NicknameUpdateResponse, RoleSyncResponse,
};
