//! Repository traits (ports) - define the interface for data access
//!
//! The membership tables are owned by the datastore and edited elsewhere;
//! apart from generation roles this service only reads them.

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{GenerationRole, Member, MemberRecord, Team};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find a non-deleted member by Discord user id
    async fn find_by_discord_uid(&self, discord_uid: Snowflake) -> RepoResult<Option<Member>>;

    /// Every non-deleted row, newest generation first, then by student number
    ///
    /// Rows that do not map to a `Member` (unknown status, malformed id) are
    /// kept in place as `Err`.
    async fn find_active_records(&self) -> RepoResult<Vec<MemberRecord>>;

    /// Non-deleted members in `find_active_records` order, invalid rows left out
    async fn find_active(&self) -> RepoResult<Vec<Member>> {
        Ok(self
            .find_active_records()
            .await?
            .into_iter()
            .filter_map(Result::ok)
            .collect())
    }
}

// ============================================================================
// Team Repository
// ============================================================================

#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// List every team
    async fn find_all(&self) -> RepoResult<Vec<Team>>;

    /// Team ids the member belongs to
    async fn team_ids_for_member(&self, member_id: Uuid) -> RepoResult<Vec<Uuid>>;

    /// Whether the member leads at least one team
    async fn is_leader(&self, member_id: Uuid) -> RepoResult<bool>;

    /// Number of teams (used as a cheap keep-alive query)
    async fn count(&self) -> RepoResult<i64>;
}

// ============================================================================
// Generation Role Repository
// ============================================================================

#[async_trait]
pub trait GenerationRoleRepository: Send + Sync {
    /// List every generation → role mapping
    async fn find_all(&self) -> RepoResult<Vec<GenerationRole>>;

    /// Find the mapping for one generation
    async fn find_by_generation(&self, generation: i32) -> RepoResult<Option<GenerationRole>>;

    /// Insert a new mapping
    ///
    /// Fails with `GenerationRoleExists` if the generation is already mapped.
    async fn create(&self, role: &GenerationRole) -> RepoResult<()>;
}
