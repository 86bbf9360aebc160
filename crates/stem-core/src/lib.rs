//! # stem-core
//!
//! Domain layer containing entities, the role policy, nickname rules and the
//! ports implemented by the database and Discord adapters.
//! This crate has zero dependencies on infrastructure (database, HTTP, etc.).

pub mod entities;
pub mod error;
pub mod nickname;
pub mod policy;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    GenerationRole, GuildMember, GuildRole, InvalidMemberRow, Member, MemberRecord, MemberStatus,
    Team, TeamLeader,
};
pub use error::DomainError;
pub use nickname::{extract_name, format_member_nickname, format_nickname, NICKNAME_MAX_CHARS};
pub use policy::{
    evaluate, ManagedRoleIds, MemberFacts, PlannedRole, RoleCatalog, RoleCategory, RoleChange,
    RoleChangeKind, RoleDiff, RolePlan,
};
pub use traits::{
    GenerationRoleRepository, GuildGateway, MemberRepository, RepoResult, TeamRepository,
};
pub use value_objects::{Snowflake, SnowflakeParseError};
