//! Role policy - which Discord roles a member should hold, and how to get there
//!
//! [`evaluate`] is pure: it turns member facts plus the role catalog into a
//! [`RolePlan`]. [`RoleDiff::compute`] compares a plan with the roles a member
//! currently holds and only ever touches role ids that appear in the plan.

mod managed_roles;
mod role_diff;
mod role_policy;

pub use managed_roles::ManagedRoleIds;
pub use role_diff::{RoleChange, RoleChangeKind, RoleDiff};
pub use role_policy::{evaluate, MemberFacts, PlannedRole, RoleCatalog, RoleCategory, RolePlan};
