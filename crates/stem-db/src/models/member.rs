//! Member database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the members table
#[derive(Debug, Clone, FromRow)]
pub struct MemberModel {
    pub supabase_auth_user_id: Uuid,
    pub status: i16,
    pub generation: i32,
    pub student_number: Option<String>,
    pub discord_uid: String,
    pub avatar_url: Option<String>,
    pub is_admin: bool,
    pub joined_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}
