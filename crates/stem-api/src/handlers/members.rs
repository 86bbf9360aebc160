//! Member handlers
//!
//! Guild presence and the member directory.

use axum::{extract::State, Json};
use stem_service::dto::{DiscordUidQuery, MemberStatusResponse, MembersResponse};
use stem_service::MemberDirectoryService;

use crate::extractors::{ApiToken, ValidatedQuery};
use crate::response::ApiResult;
use crate::state::AppState;

/// Whether a user is in the guild, with nickname and roles
///
/// GET /api/member/status?discord_uid=
pub async fn member_status(
    State(state): State<AppState>,
    _auth: ApiToken,
    ValidatedQuery(query): ValidatedQuery<DiscordUidQuery>,
) -> ApiResult<Json<MemberStatusResponse>> {
    let service = MemberDirectoryService::new(state.service_context());
    let view = service.member_status(query.uid()).await?;
    Ok(Json(view.into()))
}

/// Every registered member still in the guild
///
/// GET /api/members
pub async fn list_members(
    State(state): State<AppState>,
    _auth: ApiToken,
) -> ApiResult<Json<MembersResponse>> {
    let service = MemberDirectoryService::new(state.service_context());
    let entries = service.list_members().await?;
    Ok(Json(entries.into()))
}
