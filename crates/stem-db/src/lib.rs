//! # stem-db
//!
//! Database layer implementing the stem-core repository traits with PostgreSQL via SQLx.
//!
//! The membership tables (`members`, `teams`, `member_team_relations`,
//! `team_leaders`, `generation_roles`) are owned by the hosted datastore.
//! Discord ids are stored as text and parsed into snowflakes by the mappers.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stem_db::{create_pool, PgMemberRepository};
//! use stem_core::traits::MemberRepository;
//!
//! async fn example(config: &stem_common::DatabaseConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(config).await?;
//!     let members = PgMemberRepository::new(pool);
//!     let active = members.find_active().await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

/// Schema of the membership tables, for local databases and tests
pub const SCHEMA_SQL: &str = include_str!("../migrations/0001_membership.sql");

// Re-export commonly used types
pub use pool::{create_pool, create_pool_with_timeouts, PgPool, PoolTimeouts};
pub use repositories::{PgGenerationRoleRepository, PgMemberRepository, PgTeamRepository};
