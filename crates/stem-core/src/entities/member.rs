//! Member entity - a club member as recorded in the membership datastore

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Member lifecycle stage
///
/// Stored as a small integer in the datastore (0, 1, 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    /// Junior high school student (中学生)
    Junior,
    /// Senior high school student (高校生)
    Senior,
    /// Graduate (OB)
    Alumnus,
}

impl MemberStatus {
    /// Integer code used by the datastore
    #[inline]
    pub const fn code(self) -> i16 {
        match self {
            Self::Junior => 0,
            Self::Senior => 1,
            Self::Alumnus => 2,
        }
    }

    /// Parse the datastore integer code
    pub fn from_code(code: i16) -> Result<Self, DomainError> {
        match code {
            0 => Ok(Self::Junior),
            1 => Ok(Self::Senior),
            2 => Ok(Self::Alumnus),
            other => Err(DomainError::InvalidStatus(other)),
        }
    }

    /// Whether the member is still enrolled (junior or senior)
    #[inline]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Junior | Self::Senior)
    }

    /// Human-readable label used in role reports
    pub const fn label(self) -> &'static str {
        match self {
            Self::Junior => "中学生",
            Self::Senior => "高校生",
            Self::Alumnus => "OB",
        }
    }
}

impl TryFrom<i16> for MemberStatus {
    type Error = DomainError;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

/// Member entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Auth user id of the member in the datastore
    pub id: Uuid,
    pub status: MemberStatus,
    /// Cohort number (期)
    pub generation: i32,
    pub student_number: Option<String>,
    pub discord_uid: Snowflake,
    pub avatar_url: Option<String>,
    pub is_admin: bool,
    pub joined_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Member {
    /// Check if the member has been soft-deleted
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Student number, treating blank values as missing
    pub fn student_number(&self) -> Option<&str> {
        self.student_number
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// A non-deleted members row that does not map to a `Member`
#[derive(Debug)]
pub struct InvalidMemberRow {
    /// Discord id exactly as stored
    pub discord_uid: String,
    pub error: DomainError,
}

/// One members row, valid or not
pub type MemberRecord = Result<Member, InvalidMemberRow>;
