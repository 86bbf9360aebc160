//! PostgreSQL implementation of GenerationRoleRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use stem_core::entities::GenerationRole;
use stem_core::error::DomainError;
use stem_core::traits::{GenerationRoleRepository, RepoResult};

use crate::mappers::{map_valid_rows, GenerationRoleInsert};
use crate::models::GenerationRoleModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of GenerationRoleRepository
#[derive(Clone)]
pub struct PgGenerationRoleRepository {
    pool: PgPool,
}

impl PgGenerationRoleRepository {
    /// Create a new PgGenerationRoleRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GenerationRoleRepository for PgGenerationRoleRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<GenerationRole>> {
        let rows = sqlx::query_as::<_, GenerationRoleModel>(
            r#"
            SELECT generation, discord_role_id
            FROM generation_roles
            ORDER BY generation
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(map_valid_rows(rows, "generation_roles"))
    }

    #[instrument(skip(self))]
    async fn find_by_generation(&self, generation: i32) -> RepoResult<Option<GenerationRole>> {
        let row = sqlx::query_as::<_, GenerationRoleModel>(
            r#"
            SELECT generation, discord_role_id
            FROM generation_roles
            WHERE generation = $1
            "#,
        )
        .bind(generation)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        row.map(GenerationRole::try_from).transpose()
    }

    #[instrument(skip(self, role), fields(generation = role.generation, role_id = %role.discord_role_id))]
    async fn create(&self, role: &GenerationRole) -> RepoResult<()> {
        let insert = GenerationRoleInsert::new(role);

        sqlx::query(
            r#"
            INSERT INTO generation_roles (generation, discord_role_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(insert.generation)
        .bind(&insert.discord_role_id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::GenerationRoleExists(role.generation)))?;

        Ok(())
    }
}
