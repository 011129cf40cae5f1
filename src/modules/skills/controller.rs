use axum::extract::{Path, State};
use livefit_core::validation::INVALID_ID;
use livefit_core::{ApiResponse, AppError};
use livefit_models::{CreateSkillDto, Skill, SkillSummary};
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::state::AppState;
use crate::validator::{ValidatedJson, parse_path_id};

use super::service::SkillService;

#[utoipa::path(
    get,
    path = "/api/skill",
    responses(
        (status = 200, description = "All skills", body = Vec<SkillSummary>)
    ),
    tag = "Skills"
)]
#[instrument(skip(state))]
pub async fn get_skills(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<SkillSummary>>, AppError> {
    let skills = SkillService::get_skills(&state.db).await?;
    Ok(ApiResponse::success(skills))
}

#[utoipa::path(
    post,
    path = "/api/skill",
    request_body = CreateSkillDto,
    responses(
        (status = 200, description = "Skill created", body = Skill),
        (status = 400, description = "Invalid field values", body = ErrorResponse),
        (status = 409, description = "Duplicate data", body = ErrorResponse)
    ),
    tag = "Skills"
)]
#[instrument(skip(state, dto))]
pub async fn create_skill(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateSkillDto>,
) -> Result<ApiResponse<Skill>, AppError> {
    let skill = SkillService::create_skill(&state.db, dto).await?;
    Ok(ApiResponse::success(skill))
}

#[utoipa::path(
    delete,
    path = "/api/skill/{skill_id}",
    params(("skill_id" = String, Path, description = "Skill ID (UUID)")),
    responses(
        (status = 200, description = "Skill deleted"),
        (status = 400, description = "Invalid ID", body = ErrorResponse)
    ),
    tag = "Skills"
)]
#[instrument(skip(state))]
pub async fn delete_skill(
    State(state): State<AppState>,
    Path(skill_id): Path<String>,
) -> Result<ApiResponse<()>, AppError> {
    let skill_id = parse_path_id(&skill_id, INVALID_ID)?;
    SkillService::delete_skill(&state.db, skill_id).await?;
    Ok(ApiResponse::ok())
}
