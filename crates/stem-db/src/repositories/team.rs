//! PostgreSQL implementation of TeamRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use stem_core::entities::Team;
use stem_core::traits::{RepoResult, TeamRepository};

use crate::mappers::map_valid_rows;
use crate::models::TeamModel;

use super::error::map_db_error;

/// PostgreSQL implementation of TeamRepository
#[derive(Clone)]
pub struct PgTeamRepository {
    pool: PgPool,
}

impl PgTeamRepository {
    /// Create a new PgTeamRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PgTeamRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<Team>> {
        let rows = sqlx::query_as::<_, TeamModel>(
            r#"
            SELECT id, name, discord_role_id
            FROM teams
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(map_valid_rows(rows, "teams"))
    }

    #[instrument(skip(self))]
    async fn team_ids_for_member(&self, member_id: Uuid) -> RepoResult<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT team_id FROM member_team_relations WHERE member_id = $1
            "#,
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn is_leader(&self, member_id: Uuid) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM team_leaders WHERE member_id = $1)
            "#,
        )
        .bind(member_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM teams")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
