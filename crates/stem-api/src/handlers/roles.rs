//! Role sync handlers

use axum::{extract::State, Json};
use stem_service::dto::{BulkSyncResponse, RoleSyncResponse, SyncMemberRequest};
use stem_service::RoleSyncService;

use crate::extractors::{ApiToken, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Sync one member's roles
///
/// POST /api/roles/sync
pub async fn sync_member(
    State(state): State<AppState>,
    _auth: ApiToken,
    ValidatedJson(req): ValidatedJson<SyncMemberRequest>,
) -> ApiResult<Json<RoleSyncResponse>> {
    let service = RoleSyncService::new(state.service_context());
    let report = service.sync_member(req.uid()).await?;
    Ok(Json(report.into()))
}

/// Sync every member's roles
///
/// POST /api/roles/sync-all
pub async fn sync_all(
    State(state): State<AppState>,
    _auth: ApiToken,
) -> ApiResult<Json<BulkSyncResponse>> {
    let service = RoleSyncService::new(state.service_context());
    let report = service.sync_all().await?;
    Ok(Json(report.into()))
}
