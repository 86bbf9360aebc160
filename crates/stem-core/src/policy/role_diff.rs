//! Role diff - minimal additions and removals to reach a role plan

use std::collections::HashSet;

use crate::value_objects::Snowflake;

use super::RolePlan;

/// Direction of a role change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleChangeKind {
    Add,
    Remove,
}

/// A single role mutation to apply to a member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleChange {
    pub role_id: Snowflake,
    pub label: String,
    pub kind: RoleChangeKind,
}

/// Role mutations needed to move a member from its current roles to a plan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleDiff {
    pub to_add: Vec<RoleChange>,
    pub to_remove: Vec<RoleChange>,
}

impl RoleDiff {
    /// Compare a plan with the roles currently held
    ///
    /// Role ids absent from the plan are never touched.
    pub fn compute(plan: &RolePlan, current: &HashSet<Snowflake>) -> Self {
        let desired = plan.desired_ids();
        let mut diff = Self::default();
        let mut seen = HashSet::new();

        for entry in plan.entries() {
            if !seen.insert(entry.role_id) {
                continue;
            }

            let held = current.contains(&entry.role_id);
            let wanted = desired.contains(&entry.role_id);

            if wanted && !held {
                diff.to_add.push(RoleChange {
                    role_id: entry.role_id,
                    label: label_for(plan, entry.role_id, true),
                    kind: RoleChangeKind::Add,
                });
            } else if !wanted && held {
                diff.to_remove.push(RoleChange {
                    role_id: entry.role_id,
                    label: entry.label.clone(),
                    kind: RoleChangeKind::Remove,
                });
            }
        }

        diff
    }

    /// Check if the member already matches the plan
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    /// Total number of mutations
    pub fn len(&self) -> usize {
        self.to_add.len() + self.to_remove.len()
    }

    /// Additions followed by removals
    pub fn changes(&self) -> impl Iterator<Item = &RoleChange> {
        self.to_add.iter().chain(self.to_remove.iter())
    }
}

// Label of the first entry for the role id with the wanted desired-state
fn label_for(plan: &RolePlan, role_id: Snowflake, desired: bool) -> String {
    plan.entries()
        .iter()
        .find(|e| e.role_id == role_id && e.desired == desired)
        .map(|e| e.label.clone())
        .unwrap_or_default()
}
