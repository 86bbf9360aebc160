//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in stem-core.

mod error;
mod generation_role;
mod member;
mod team;

pub use generation_role::PgGenerationRoleRepository;
pub use member::PgMemberRepository;
pub use team::PgTeamRepository;
