//! Generation handler

use axum::{extract::State, Json};
use stem_service::dto::{CreateGenerationRequest, GenerationResponse};
use stem_service::GenerationService;

use crate::extractors::{ApiToken, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Create the role of a new generation
///
/// POST /api/generation
pub async fn create_generation(
    State(state): State<AppState>,
    _auth: ApiToken,
    ValidatedJson(req): ValidatedJson<CreateGenerationRequest>,
) -> ApiResult<Json<GenerationResponse>> {
    let service = GenerationService::new(state.service_context());
    let role = service.create_generation(req.generation).await?;
    Ok(Json(role.into()))
}
