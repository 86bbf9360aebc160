//! # stem-service
//!
//! Application layer containing role sync, nickname, generation and member
//! directory use cases, plus the DTOs the HTTP layer serializes.

pub mod dto;
pub mod services;

pub use services::{
    GenerationService, MemberDirectoryService, NicknameService, RoleSyncService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult,
};
