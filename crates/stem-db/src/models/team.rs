//! Team database model

use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the teams table
#[derive(Debug, Clone, FromRow)]
pub struct TeamModel {
    pub id: Uuid,
    pub name: String,
    pub discord_role_id: String,
}
