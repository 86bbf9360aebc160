//! Configured role ids for the fixed role categories

use crate::entities::MemberStatus;
use crate::value_objects::Snowflake;

/// Discord role ids for the categories that are not backed by datastore rows
///
/// A `None` makes that category inert: its role is neither granted nor revoked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManagedRoleIds {
    /// 班長
    pub leader: Option<Snowflake>,
    /// 中学生
    pub junior: Option<Snowflake>,
    /// 高校生
    pub senior: Option<Snowflake>,
    /// OB
    pub alumnus: Option<Snowflake>,
    /// 部員
    pub member: Option<Snowflake>,
    /// 認証済み
    pub verified: Option<Snowflake>,
}

impl ManagedRoleIds {
    /// Role id for a member status, if configured
    pub const fn status_role(&self, status: MemberStatus) -> Option<Snowflake> {
        match status {
            MemberStatus::Junior => self.junior,
            MemberStatus::Senior => self.senior,
            MemberStatus::Alumnus => self.alumnus,
        }
    }

    /// Number of configured categories
    pub fn configured_count(&self) -> usize {
        [
            self.leader,
            self.junior,
            self.senior,
            self.alumnus,
            self.member,
            self.verified,
        ]
        .iter()
        .filter(|id| id.is_some())
        .count()
    }
}
