use chrono::{DateTime, Utc};
use livefit_core::AppError;
use livefit_core::validation::{
    INVALID_DATE, INVALID_FIELDS, START_AFTER_END, parse_iso8601, parse_uuid,
};
use livefit_db::unique_violation;
use livefit_models::{
    Coach, CoachProfileDto, CoachUserInfo, CoachWithUser, Course, CourseDto, OwnedCourseItem,
    UserRole,
};
use sqlx::PgPool;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::modules::coaches::service::COACH_NOT_FOUND;

pub const USER_NOT_FOUND: &str = "User not found";
pub const ALREADY_COACH: &str = "User is already a coach";
pub const UPDATE_USER_FAILED: &str = "Failed to update user";
pub const SKILL_NOT_FOUND: &str = "Skill not found";
pub const COURSE_NOT_FOUND: &str = "Course not found";
pub const UPDATE_COURSE_FAILED: &str = "Failed to update course";

const COURSE_COLUMNS: &str = "id, user_id, skill_id, name, description, start_at, end_at, \
     max_participants, meeting_url, created_at, updated_at";

const COACH_COLUMNS: &str =
    "id, user_id, experience_years, description, profile_image_url, created_at, updated_at";

/// Validated course fields ready to be written.
#[derive(Debug, PartialEq)]
pub struct CourseSchedule {
    pub skill_id: Uuid,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
}

impl CourseSchedule {
    /// Date format first, then ordering. `start_at == end_at` is allowed.
    pub fn from_dto(dto: &CourseDto) -> Result<Self, AppError> {
        let (Some(start_at), Some(end_at)) = (parse_iso8601(&dto.start_at), parse_iso8601(&dto.end_at))
        else {
            return Err(AppError::failed(INVALID_DATE));
        };

        if start_at > end_at {
            return Err(AppError::failed(START_AFTER_END));
        }

        let skill_id = parse_uuid(&dto.skill_id).ok_or_else(|| AppError::failed(INVALID_FIELDS))?;

        Ok(Self {
            skill_id,
            start_at,
            end_at,
        })
    }
}

pub struct AdminService;

impl AdminService {
    /// Promotes a USER to COACH and creates the coach profile in one transaction.
    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "users"))]
    pub async fn promote_to_coach(
        db: &PgPool,
        user_id: Uuid,
        dto: CoachProfileDto,
    ) -> Result<CoachWithUser, AppError> {
        let role = sqlx::query_scalar::<_, String>("SELECT role FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(db)
            .await?;

        match role.as_deref() {
            None => {
                warn!("promotion of unknown user");
                return Err(AppError::failed(USER_NOT_FOUND));
            }
            Some(r) if r == UserRole::Coach.as_str() => {
                warn!("user is already a coach");
                return Err(AppError::conflict(anyhow::anyhow!(ALREADY_COACH)));
            }
            Some(_) => {}
        }

        let mut tx = db.begin().await?;

        let user = sqlx::query_as::<_, CoachUserInfo>(
            "UPDATE users SET role = $1, updated_at = now()
             WHERE id = $2 AND role = $3
             RETURNING name, role",
        )
        .bind(UserRole::Coach.as_str())
        .bind(user_id)
        .bind(UserRole::User.as_str())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            warn!("role update affected no rows");
            AppError::failed(UPDATE_USER_FAILED)
        })?;

        let coach = sqlx::query_as::<_, Coach>(&format!(
            "INSERT INTO coaches (user_id, experience_years, description, profile_image_url)
             VALUES ($1, $2, $3, $4)
             RETURNING {COACH_COLUMNS}"
        ))
        .bind(user_id)
        .bind(dto.experience_years)
        .bind(&dto.description)
        .bind(&dto.profile_image_url)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if unique_violation(&e).is_some() {
                return AppError::conflict(anyhow::anyhow!(ALREADY_COACH));
            }
            AppError::from(e)
        })?;

        tx.commit().await?;

        info!(coach.id = %coach.id, "user promoted to coach");
        Ok(CoachWithUser { user, coach })
    }

    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "coaches"))]
    pub async fn update_coach_profile(
        db: &PgPool,
        user_id: Uuid,
        dto: CoachProfileDto,
    ) -> Result<Coach, AppError> {
        let coach = sqlx::query_as::<_, Coach>(&format!(
            "UPDATE coaches
             SET experience_years = $1, description = $2, profile_image_url = $3, updated_at = now()
             WHERE user_id = $4
             RETURNING {COACH_COLUMNS}"
        ))
        .bind(dto.experience_years)
        .bind(&dto.description)
        .bind(&dto.profile_image_url)
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::failed(COACH_NOT_FOUND))?;

        info!(coach.id = %coach.id, "coach profile updated");
        Ok(coach)
    }

    async fn ensure_skill_exists(db: &PgPool, skill_id: Uuid) -> Result<(), AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM skills WHERE id = $1)")
                .bind(skill_id)
                .fetch_one(db)
                .await?;

        if !exists {
            return Err(AppError::failed(SKILL_NOT_FOUND));
        }
        Ok(())
    }

    #[instrument(skip(db, dto), fields(db.operation = "INSERT", db.table = "courses"))]
    pub async fn create_course(
        db: &PgPool,
        owner_id: Uuid,
        dto: CourseDto,
    ) -> Result<Course, AppError> {
        let schedule = CourseSchedule::from_dto(&dto)?;
        Self::ensure_skill_exists(db, schedule.skill_id).await?;

        let course = sqlx::query_as::<_, Course>(&format!(
            "INSERT INTO courses
                (user_id, skill_id, name, description, start_at, end_at, max_participants, meeting_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COURSE_COLUMNS}"
        ))
        .bind(owner_id)
        .bind(schedule.skill_id)
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(schedule.start_at)
        .bind(schedule.end_at)
        .bind(dto.max_participants)
        .bind(&dto.meeting_url)
        .fetch_one(db)
        .await?;

        info!(course.id = %course.id, "course created");
        Ok(course)
    }

    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "courses"))]
    pub async fn update_course(
        db: &PgPool,
        owner_id: Uuid,
        course_id: Uuid,
        dto: CourseDto,
    ) -> Result<Course, AppError> {
        let schedule = CourseSchedule::from_dto(&dto)?;

        let owned = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1 AND user_id = $2)",
        )
        .bind(course_id)
        .bind(owner_id)
        .fetch_one(db)
        .await?;
        if !owned {
            return Err(AppError::failed(COURSE_NOT_FOUND));
        }

        Self::ensure_skill_exists(db, schedule.skill_id).await?;

        let course = sqlx::query_as::<_, Course>(&format!(
            "UPDATE courses
             SET skill_id = $1, name = $2, description = $3, start_at = $4, end_at = $5,
                 max_participants = $6, meeting_url = $7, updated_at = now()
             WHERE id = $8 AND user_id = $9
             RETURNING {COURSE_COLUMNS}"
        ))
        .bind(schedule.skill_id)
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(schedule.start_at)
        .bind(schedule.end_at)
        .bind(dto.max_participants)
        .bind(&dto.meeting_url)
        .bind(course_id)
        .bind(owner_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| {
            warn!("course update affected no rows");
            AppError::failed(UPDATE_COURSE_FAILED)
        })?;

        info!("course updated");
        Ok(course)
    }

    const OWNED_COURSE_SELECT: &'static str =
        "SELECT c.id, c.name, s.name AS skill_name, c.start_at, c.end_at, c.max_participants,
                (SELECT COUNT(*) FROM course_bookings b
                 WHERE b.course_id = c.id AND b.cancelled_at IS NULL) AS participants,
                c.meeting_url
         FROM courses c
         JOIN skills s ON s.id = c.skill_id";

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "courses"))]
    pub async fn get_own_courses(
        db: &PgPool,
        owner_id: Uuid,
    ) -> Result<Vec<OwnedCourseItem>, AppError> {
        let courses = sqlx::query_as::<_, OwnedCourseItem>(&format!(
            "{} WHERE c.user_id = $1 ORDER BY c.start_at DESC",
            Self::OWNED_COURSE_SELECT
        ))
        .bind(owner_id)
        .fetch_all(db)
        .await?;

        Ok(courses)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "courses"))]
    pub async fn get_own_course(
        db: &PgPool,
        owner_id: Uuid,
        course_id: Uuid,
    ) -> Result<OwnedCourseItem, AppError> {
        sqlx::query_as::<_, OwnedCourseItem>(&format!(
            "{} WHERE c.user_id = $1 AND c.id = $2",
            Self::OWNED_COURSE_SELECT
        ))
        .bind(owner_id)
        .bind(course_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::failed(COURSE_NOT_FOUND))
    }
}
