//! Nickname handlers

use axum::{extract::State, Json};
use stem_service::dto::{DiscordUidQuery, NicknameResponse, NicknameUpdateResponse, UpdateNicknameRequest};
use stem_service::NicknameService;

use crate::extractors::{ApiToken, ValidatedJson, ValidatedQuery};
use crate::response::ApiResult;
use crate::state::AppState;

/// Current nickname of a member
///
/// GET /api/nickname?discord_uid=
pub async fn get_nickname(
    State(state): State<AppState>,
    _auth: ApiToken,
    ValidatedQuery(query): ValidatedQuery<DiscordUidQuery>,
) -> ApiResult<Json<NicknameResponse>> {
    let service = NicknameService::new(state.service_context());
    let view = service.get_nickname(query.uid()).await?;
    Ok(Json(view.into()))
}

/// Set a member's canonical nickname
///
/// POST /api/nickname/update
pub async fn update_nickname(
    State(state): State<AppState>,
    _auth: ApiToken,
    ValidatedJson(req): ValidatedJson<UpdateNicknameRequest>,
) -> ApiResult<Json<NicknameUpdateResponse>> {
    let service = NicknameService::new(state.service_context());
    let updated_nickname = service.update_nickname(req.uid(), &req.name).await?;

    Ok(Json(NicknameUpdateResponse {
        success: true,
        name: req.name.trim().to_string(),
        updated_nickname,
    }))
}
