//! Role policy evaluator

use std::collections::HashSet;
use std::fmt;

use uuid::Uuid;

use crate::entities::{GenerationRole, Member, MemberStatus, Team};
use crate::value_objects::Snowflake;

use super::ManagedRoleIds;

const LEADER_LABEL: &str = "班長";
const MEMBER_LABEL: &str = "部員";
const VERIFIED_LABEL: &str = "認証済み";

/// Category a managed role belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleCategory {
    Generation,
    Team,
    Leader,
    Status,
    Member,
    Verified,
}

impl fmt::Display for RoleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Generation => "generation",
            Self::Team => "team",
            Self::Leader => "leader",
            Self::Status => "status",
            Self::Member => "member",
            Self::Verified => "verified",
        };
        f.write_str(name)
    }
}

/// Facts about a member that decide its roles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberFacts {
    pub status: MemberStatus,
    pub generation: i32,
    pub team_ids: HashSet<Uuid>,
    pub is_leader: bool,
}

impl MemberFacts {
    /// Collect facts for a member from its related rows
    pub fn new(member: &Member, team_ids: impl IntoIterator<Item = Uuid>, is_leader: bool) -> Self {
        Self {
            status: member.status,
            generation: member.generation,
            team_ids: team_ids.into_iter().collect(),
            is_leader,
        }
    }
}

/// Every role the policy has an opinion about
#[derive(Debug, Clone, Copy)]
pub struct RoleCatalog<'a> {
    pub generation_roles: &'a [GenerationRole],
    pub teams: &'a [Team],
    pub managed: &'a ManagedRoleIds,
}

/// One managed role and whether the member should hold it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRole {
    pub role_id: Snowflake,
    pub label: String,
    pub category: RoleCategory,
    pub desired: bool,
}

/// Target state for every managed role of one member
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RolePlan {
    entries: Vec<PlannedRole>,
}

impl RolePlan {
    fn push(&mut self, role_id: Snowflake, label: impl Into<String>, category: RoleCategory, desired: bool) {
        self.entries.push(PlannedRole {
            role_id,
            label: label.into(),
            category,
            desired,
        });
    }

    /// All planned entries, in evaluation order
    pub fn entries(&self) -> &[PlannedRole] {
        &self.entries
    }

    /// Role ids the member should hold
    ///
    /// A role id listed under several categories is desired if any entry wants it.
    pub fn desired_ids(&self) -> HashSet<Snowflake> {
        self.entries
            .iter()
            .filter(|e| e.desired)
            .map(|e| e.role_id)
            .collect()
    }

    /// Every role id the policy manages
    pub fn managed_ids(&self) -> HashSet<Snowflake> {
        self.entries.iter().map(|e| e.role_id).collect()
    }

    /// Check if a role id should be held
    pub fn is_desired(&self, role_id: Snowflake) -> bool {
        self.entries
            .iter()
            .any(|e| e.role_id == role_id && e.desired)
    }

    /// Desired entries of one category
    pub fn desired_in(&self, category: RoleCategory) -> impl Iterator<Item = &PlannedRole> {
        self.entries
            .iter()
            .filter(move |e| e.desired && e.category == category)
    }
}

/// Evaluate the role policy for one member
pub fn evaluate(facts: &MemberFacts, catalog: &RoleCatalog<'_>) -> RolePlan {
    let mut plan = RolePlan::default();

    // Exactly the role of the member's own generation
    for role in catalog.generation_roles {
        plan.push(
            role.discord_role_id,
            role.label(),
            RoleCategory::Generation,
            role.generation == facts.generation,
        );
    }

    // Exactly the roles of teams the member belongs to
    for team in catalog.teams {
        plan.push(
            team.discord_role_id,
            team.name.clone(),
            RoleCategory::Team,
            facts.team_ids.contains(&team.id),
        );
    }

    if let Some(leader) = catalog.managed.leader {
        plan.push(leader, LEADER_LABEL, RoleCategory::Leader, facts.is_leader);
    }

    for status in [MemberStatus::Junior, MemberStatus::Senior, MemberStatus::Alumnus] {
        if let Some(role_id) = catalog.managed.status_role(status) {
            plan.push(role_id, status.label(), RoleCategory::Status, status == facts.status);
        }
    }

    if let Some(member_role) = catalog.managed.member {
        plan.push(member_role, MEMBER_LABEL, RoleCategory::Member, facts.status.is_active());
    }

    // Every member present in the datastore counts as verified
    if let Some(verified) = catalog.managed.verified {
        plan.push(verified, VERIFIED_LABEL, RoleCategory::Verified, true);
    }

    plan
}
