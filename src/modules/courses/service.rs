use livefit_core::AppError;
use livefit_models::{BookingStatus, CourseListItem};
use sqlx::PgPool;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::modules::admin::service::COURSE_NOT_FOUND;
use crate::modules::users::service::UserService;

pub const ALREADY_BOOKED: &str = "Already booked this course";
pub const NO_CREDITS: &str = "No remaining credits";
pub const COURSE_FULL: &str = "Course has reached maximum participants";
pub const BOOKING_NOT_FOUND: &str = "Booking not found";

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "courses"))]
    pub async fn get_courses(db: &PgPool) -> Result<Vec<CourseListItem>, AppError> {
        let courses = sqlx::query_as::<_, CourseListItem>(
            "SELECT c.id, c.name, c.description, c.start_at, c.end_at, c.max_participants,
                    u.name AS coach_name, s.name AS skill_name
             FROM courses c
             JOIN users u ON u.id = c.user_id
             JOIN skills s ON s.id = c.skill_id
             ORDER BY c.start_at",
        )
        .fetch_all(db)
        .await?;

        Ok(courses)
    }

    /// Books a course for the user.
    ///
    /// The course row and then the user row are locked for the whole
    /// transaction. The course lock orders bookings of one course against the
    /// capacity check; the user lock orders one user's bookings of different
    /// courses against the credit check.
    #[instrument(skip(db), fields(db.operation = "INSERT", db.table = "course_bookings"))]
    pub async fn book(db: &PgPool, user_id: Uuid, course_id: Uuid) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        let max_participants = sqlx::query_scalar::<_, i32>(
            "SELECT max_participants FROM courses WHERE id = $1 FOR UPDATE",
        )
        .bind(course_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::failed(COURSE_NOT_FOUND))?;

        sqlx::query("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let already_booked = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM course_bookings
                WHERE user_id = $1 AND course_id = $2 AND cancelled_at IS NULL
             )",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_one(&mut *tx)
        .await?;
        if already_booked {
            debug!("course already booked by user");
            return Err(AppError::failed(ALREADY_BOOKED));
        }

        let purchased = UserService::purchased_credits(&mut *tx, user_id).await?;
        let used = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM course_bookings WHERE user_id = $1 AND cancelled_at IS NULL",
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;
        if used >= purchased {
            debug!(purchased, used, "no credits left");
            return Err(AppError::failed(NO_CREDITS));
        }

        let participants = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM course_bookings WHERE course_id = $1 AND cancelled_at IS NULL",
        )
        .bind(course_id)
        .fetch_one(&mut *tx)
        .await?;
        if participants >= i64::from(max_participants) {
            warn!(participants, max_participants, "course is full");
            return Err(AppError::failed(COURSE_FULL));
        }

        sqlx::query(
            "INSERT INTO course_bookings (user_id, course_id, status, booking_at)
             VALUES ($1, $2, $3, now())",
        )
        .bind(user_id)
        .bind(course_id)
        .bind(BookingStatus::Pending.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if livefit_db::unique_violation(&e).is_some() {
                return AppError::failed(ALREADY_BOOKED);
            }
            AppError::from(e)
        })?;

        tx.commit().await?;

        info!("course booked");
        Ok(())
    }

    /// Cancels the user's active booking. A second call finds nothing to cancel.
    #[instrument(skip(db), fields(db.operation = "UPDATE", db.table = "course_bookings"))]
    pub async fn cancel(db: &PgPool, user_id: Uuid, course_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE course_bookings SET status = $1, cancelled_at = now()
             WHERE user_id = $2 AND course_id = $3 AND cancelled_at IS NULL",
        )
        .bind(BookingStatus::Cancelled.as_str())
        .bind(user_id)
        .bind(course_id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::failed(BOOKING_NOT_FOUND));
        }

        info!("booking cancelled");
        Ok(())
    }
}
