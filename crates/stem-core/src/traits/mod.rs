//! Ports implemented by the infrastructure crates

mod gateway;
mod repositories;

pub use gateway::GuildGateway;
pub use repositories::{GenerationRoleRepository, MemberRepository, RepoResult, TeamRepository};
