use axum::extract::{Path, State};
use livefit_core::validation::{INVALID_FIELDS, INVALID_ID};
use livefit_core::{ApiResponse, AppError, Created};
use livefit_models::{Coach, CoachProfileDto, CoachWithUser, CourseDto, CourseResponse, OwnedCourseItem};
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::middleware::role::RequireCoach;
use crate::state::AppState;
use crate::validator::{ValidatedJson, parse_path_id};

use super::service::AdminService;

/// Promote a user to coach
#[utoipa::path(
    post,
    path = "/api/admin/coaches/{user_id}",
    params(("user_id" = String, Path, description = "User ID (UUID)")),
    request_body = CoachProfileDto,
    responses(
        (status = 201, description = "User promoted", body = CoachWithUser),
        (status = 400, description = "Invalid fields or user not found", body = ErrorResponse),
        (status = 409, description = "User is already a coach", body = ErrorResponse)
    ),
    tag = "Admin"
)]
#[instrument(skip(state, dto))]
pub async fn promote_to_coach(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    ValidatedJson(dto): ValidatedJson<CoachProfileDto>,
) -> Result<Created<CoachWithUser>, AppError> {
    let user_id = parse_path_id(&user_id, INVALID_FIELDS)?;
    let promoted = AdminService::promote_to_coach(&state.db, user_id, dto).await?;
    Ok(Created(promoted))
}

/// Update the signed-in coach's profile
#[utoipa::path(
    put,
    path = "/api/admin/coaches",
    request_body = CoachProfileDto,
    responses(
        (status = 200, description = "Coach profile updated", body = Coach),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
        (status = 401, description = "Not logged in or not a coach", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = %auth_user.id()))]
pub async fn update_coach_profile(
    State(state): State<AppState>,
    RequireCoach(auth_user): RequireCoach,
    ValidatedJson(dto): ValidatedJson<CoachProfileDto>,
) -> Result<ApiResponse<Coach>, AppError> {
    let coach = AdminService::update_coach_profile(&state.db, auth_user.id(), dto).await?;
    Ok(ApiResponse::success(coach))
}

/// Create a course owned by the signed-in coach
#[utoipa::path(
    post,
    path = "/api/admin/coaches/courses",
    request_body = CourseDto,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 400, description = "Invalid fields, dates or skill", body = ErrorResponse),
        (status = 401, description = "Not logged in or not a coach", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = %auth_user.id()))]
pub async fn create_course(
    State(state): State<AppState>,
    RequireCoach(auth_user): RequireCoach,
    ValidatedJson(dto): ValidatedJson<CourseDto>,
) -> Result<Created<CourseResponse>, AppError> {
    let course = AdminService::create_course(&state.db, auth_user.id(), dto).await?;
    Ok(Created(CourseResponse { course }))
}

/// Replace one of the signed-in coach's courses
#[utoipa::path(
    put,
    path = "/api/admin/coaches/courses/{course_id}",
    params(("course_id" = String, Path, description = "Course ID (UUID)")),
    request_body = CourseDto,
    responses(
        (status = 200, description = "Course updated", body = CourseResponse),
        (status = 400, description = "Invalid fields, dates, skill or course", body = ErrorResponse),
        (status = 401, description = "Not logged in or not a coach", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = %auth_user.id()))]
pub async fn update_course(
    State(state): State<AppState>,
    RequireCoach(auth_user): RequireCoach,
    Path(course_id): Path<String>,
    ValidatedJson(dto): ValidatedJson<CourseDto>,
) -> Result<ApiResponse<CourseResponse>, AppError> {
    let course_id = parse_path_id(&course_id, INVALID_ID)?;
    let course = AdminService::update_course(&state.db, auth_user.id(), course_id, dto).await?;
    Ok(ApiResponse::success(CourseResponse { course }))
}

/// List the signed-in coach's courses with booking counts
#[utoipa::path(
    get,
    path = "/api/admin/coaches/courses",
    responses(
        (status = 200, description = "Own courses", body = Vec<OwnedCourseItem>),
        (status = 401, description = "Not logged in or not a coach", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.id()))]
pub async fn get_own_courses(
    State(state): State<AppState>,
    RequireCoach(auth_user): RequireCoach,
) -> Result<ApiResponse<Vec<OwnedCourseItem>>, AppError> {
    let courses = AdminService::get_own_courses(&state.db, auth_user.id()).await?;
    Ok(ApiResponse::success(courses))
}

#[utoipa::path(
    get,
    path = "/api/admin/coaches/courses/{course_id}",
    params(("course_id" = String, Path, description = "Course ID (UUID)")),
    responses(
        (status = 200, description = "Own course", body = OwnedCourseItem),
        (status = 400, description = "Invalid ID or course not found", body = ErrorResponse),
        (status = 401, description = "Not logged in or not a coach", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.id()))]
pub async fn get_own_course(
    State(state): State<AppState>,
    RequireCoach(auth_user): RequireCoach,
    Path(course_id): Path<String>,
) -> Result<ApiResponse<OwnedCourseItem>, AppError> {
    let course_id = parse_path_id(&course_id, INVALID_ID)?;
    let course = AdminService::get_own_course(&state.db, auth_user.id(), course_id).await?;
    Ok(ApiResponse::success(course))
}
