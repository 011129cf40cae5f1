use axum::extract::{Path, Query, State};
use livefit_core::pagination::PageError;
use livefit_core::validation::INVALID_FIELDS;
use livefit_core::{ApiResponse, AppError, PageQuery, Paginated};
use livefit_models::{CoachCourseItem, CoachListItem, CoachWithUser};
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::state::AppState;
use crate::validator::parse_path_id;

use super::service::CoachService;

pub const PAGE_NOT_POSITIVE: &str = "per and page must be positive integers";

/// List coaches, one page at a time
#[utoipa::path(
    get,
    path = "/api/coaches",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of coaches", body = Vec<CoachListItem>),
        (status = 400, description = "Missing or non-positive per/page", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Coaches"
)]
#[instrument(skip(state))]
pub async fn get_coaches(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Paginated<CoachListItem>, AppError> {
    let (per, page) = query.resolve().map_err(|e| match e {
        PageError::Missing => AppError::failed(INVALID_FIELDS),
        PageError::NotPositive => AppError::failed(PAGE_NOT_POSITIVE),
    })?;

    let (coaches, meta) =
        CoachService::get_coaches(&state.db, per, page, PageQuery::offset(per, page)).await?;
    Ok(Paginated::new(coaches, meta))
}

/// Get a coach and the account behind it
#[utoipa::path(
    get,
    path = "/api/coaches/{coach_id}",
    params(("coach_id" = String, Path, description = "Coach ID (UUID)")),
    responses(
        (status = 200, description = "Coach details", body = CoachWithUser),
        (status = 400, description = "Invalid ID or coach not found", body = ErrorResponse)
    ),
    tag = "Coaches"
)]
#[instrument(skip(state))]
pub async fn get_coach(
    State(state): State<AppState>,
    Path(coach_id): Path<String>,
) -> Result<ApiResponse<CoachWithUser>, AppError> {
    let coach_id = parse_path_id(&coach_id, INVALID_FIELDS)?;
    let coach = CoachService::get_coach(&state.db, coach_id).await?;
    Ok(ApiResponse::success(coach))
}

/// List the courses a coach runs
#[utoipa::path(
    get,
    path = "/api/coaches/{coach_id}/courses",
    params(("coach_id" = String, Path, description = "Coach ID (UUID)")),
    responses(
        (status = 200, description = "Courses of the coach", body = Vec<CoachCourseItem>),
        (status = 400, description = "Invalid ID or coach not found", body = ErrorResponse)
    ),
    tag = "Coaches"
)]
#[instrument(skip(state))]
pub async fn get_coach_courses(
    State(state): State<AppState>,
    Path(coach_id): Path<String>,
) -> Result<ApiResponse<Vec<CoachCourseItem>>, AppError> {
    let coach_id = parse_path_id(&coach_id, INVALID_FIELDS)?;
    let courses = CoachService::get_coach_courses(&state.db, coach_id).await?;
    Ok(ApiResponse::success(courses))
}
