//! Database models - SQLx-compatible structs for PostgreSQL tables

mod generation_role;
mod member;
mod team;

pub use generation_role::GenerationRoleModel;
pub use member::MemberModel;
pub use team::TeamModel;
