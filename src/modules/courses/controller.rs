use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use livefit_core::validation::INVALID_ID;
use livefit_core::{ApiResponse, AppError, NullData};
use livefit_models::CourseListItem;
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::parse_path_id;

use super::service::CourseService;

/// List all courses with coach and skill names
#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "All courses", body = Vec<CourseListItem>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_courses(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<CourseListItem>>, AppError> {
    let courses = CourseService::get_courses(&state.db).await?;
    Ok(ApiResponse::success(courses))
}

/// Book a course, spending one credit
#[utoipa::path(
    post,
    path = "/api/courses/{course_id}",
    params(("course_id" = String, Path, description = "Course ID (UUID)")),
    responses(
        (status = 201, description = "Course booked"),
        (status = 400, description = "Invalid ID, already booked, no credits or course full", body = ErrorResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.id()))]
pub async fn book_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(course_id): Path<String>,
) -> Result<(StatusCode, Json<NullData>), AppError> {
    let course_id = parse_path_id(&course_id, INVALID_ID)?;
    CourseService::book(&state.db, auth_user.id(), course_id).await?;
    Ok((StatusCode::CREATED, Json(NullData::new())))
}

/// Cancel the current user's booking of a course
#[utoipa::path(
    delete,
    path = "/api/courses/{course_id}",
    params(("course_id" = String, Path, description = "Course ID (UUID)")),
    responses(
        (status = 200, description = "Booking cancelled"),
        (status = 400, description = "Invalid ID or booking not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.id()))]
pub async fn cancel_booking(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(course_id): Path<String>,
) -> Result<ApiResponse<()>, AppError> {
    let course_id = parse_path_id(&course_id, INVALID_ID)?;
    CourseService::cancel(&state.db, auth_user.id(), course_id).await?;
    Ok(ApiResponse::ok())
}
