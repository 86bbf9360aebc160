//! Service result to DTO mappers
//!
//! Implements `From` conversions from service reports to response DTOs.

use stem_core::entities::GenerationRole;
use stem_core::RoleChangeKind;

use crate::services::member::{MemberEntry, MemberStatusView};
use crate::services::nickname::NicknameView;
use crate::services::role_sync::{BulkSyncReport, FailedRoleChange, RoleSyncReport};

use super::responses::{
    BulkSyncResponse, FailedRoleResponse, GenerationResponse, MemberStatusResponse,
    MemberSummary, MemberSyncErrorResponse, MembersResponse, NicknameResponse, RoleSyncResponse,
};

// ============================================================================
// Role Sync Mappers
// ============================================================================

impl From<FailedRoleChange> for FailedRoleResponse {
    fn from(failed: FailedRoleChange) -> Self {
        Self {
            role_id: failed.role_id,
            role: failed.label,
            action: match failed.kind {
                RoleChangeKind::Add => "add",
                RoleChangeKind::Remove => "remove",
            },
            error: failed.error,
        }
    }
}

impl From<RoleSyncReport> for RoleSyncResponse {
    fn from(report: RoleSyncReport) -> Self {
        Self {
            success: report.is_complete(),
            roles_assigned: report.assigned,
            roles_removed: report.removed,
            roles_failed: report.failed.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<BulkSyncReport> for BulkSyncResponse {
    fn from(report: BulkSyncReport) -> Self {
        Self {
            success: true,
            synced: report.synced,
            failed: report.failed,
            total: report.total,
            errors: report
                .errors
                .into_iter()
                .map(|e| MemberSyncErrorResponse {
                    discord_uid: e.discord_uid,
                    error: e.error,
                })
                .collect(),
        }
    }
}

// ============================================================================
// Nickname / Generation Mappers
// ============================================================================

impl From<NicknameView> for NicknameResponse {
    fn from(view: NicknameView) -> Self {
        Self {
            discord_uid: view.discord_uid,
            full_nickname: view.full_nickname,
            name_only: view.name_only,
        }
    }
}

impl From<GenerationRole> for GenerationResponse {
    fn from(role: GenerationRole) -> Self {
        Self {
            success: true,
            role_id: role.discord_role_id,
            generation: role.generation,
        }
    }
}

// ============================================================================
// Member Mappers
// ============================================================================

impl From<MemberStatusView> for MemberStatusResponse {
    fn from(view: MemberStatusView) -> Self {
        Self {
            discord_uid: view.discord_uid,
            is_in_server: view.is_in_server,
            current_nickname: view.current_nickname,
            current_roles: view.current_roles,
        }
    }
}

impl From<Vec<MemberEntry>> for MembersResponse {
    fn from(entries: Vec<MemberEntry>) -> Self {
        Self {
            success: true,
            data: entries
                .into_iter()
                .map(|e| MemberSummary {
                    uid: e.discord_uid,
                    name: e.name,
                })
                .collect(),
        }
    }
}
