//! Generation role database model

use sqlx::FromRow;

/// Database model for the generation_roles table
#[derive(Debug, Clone, FromRow)]
pub struct GenerationRoleModel {
    pub generation: i32,
    pub discord_role_id: String,
}
