//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{instrument, warn};

use stem_core::entities::{Member, MemberRecord};
use stem_core::traits::{MemberRepository, RepoResult};
use stem_core::value_objects::Snowflake;

use crate::mappers::member_record;
use crate::models::MemberModel;

use super::error::map_db_error;

const MEMBER_COLUMNS: &str = "supabase_auth_user_id, status::SMALLINT AS status, generation, \
     student_number, discord_uid, avatar_url, is_admin, joined_at, deleted_at";

/// PostgreSQL implementation of MemberRepository
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    /// Create a new PgMemberRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self, discord_uid), fields(discord_uid = %discord_uid))]
    async fn find_by_discord_uid(&self, discord_uid: Snowflake) -> RepoResult<Option<Member>> {
        let query = format!(
            "SELECT {MEMBER_COLUMNS} FROM members \
             WHERE discord_uid = $1 AND deleted_at IS NULL \
             LIMIT 1"
        );

        let result = sqlx::query_as::<_, MemberModel>(&query)
            .bind(discord_uid.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(Member::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_active_records(&self) -> RepoResult<Vec<MemberRecord>> {
        let query = format!(
            "SELECT {MEMBER_COLUMNS} FROM members \
             WHERE deleted_at IS NULL \
             ORDER BY generation DESC, student_number ASC NULLS LAST"
        );

        let rows = sqlx::query_as::<_, MemberModel>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let records: Vec<MemberRecord> = rows.into_iter().map(member_record).collect();
        for invalid in records.iter().filter_map(|r| r.as_ref().err()) {
            warn!(discord_uid = %invalid.discord_uid, error = %invalid.error, "Malformed member row");
        }

        Ok(records)
    }
}
