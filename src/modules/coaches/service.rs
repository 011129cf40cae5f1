use livefit_core::{AppError, PaginationMeta};
use livefit_models::{Coach, CoachCourseItem, CoachListItem, CoachUserInfo, CoachWithUser};
use sqlx::{FromRow, PgPool};
use tracing::{debug, instrument};
use uuid::Uuid;

pub const COACH_NOT_FOUND: &str = "Coach not found";

#[derive(FromRow)]
struct CoachDetailRow {
    #[sqlx(flatten)]
    coach: Coach,
    name: String,
    role: String,
}

pub struct CoachService;

impl CoachService {
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "coaches"))]
    pub async fn get_coaches(
        db: &PgPool,
        per: i64,
        page: i64,
        offset: i64,
    ) -> Result<(Vec<CoachListItem>, PaginationMeta), AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM coaches")
            .fetch_one(db)
            .await?;

        let coaches = sqlx::query_as::<_, CoachListItem>(
            "SELECT c.id, u.name, c.experience_years, c.description, c.profile_image_url
             FROM coaches c
             JOIN users u ON u.id = c.user_id
             ORDER BY c.created_at, c.id
             LIMIT $1 OFFSET $2",
        )
        .bind(per)
        .bind(offset)
        .fetch_all(db)
        .await?;

        debug!(total, returned = coaches.len(), "listed coaches");
        Ok((coaches, PaginationMeta::new(total, page, per)))
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "coaches"))]
    pub async fn get_coach(db: &PgPool, coach_id: Uuid) -> Result<CoachWithUser, AppError> {
        let row = sqlx::query_as::<_, CoachDetailRow>(
            "SELECT c.id, c.user_id, c.experience_years, c.description, c.profile_image_url,
                    c.created_at, c.updated_at, u.name, u.role
             FROM coaches c
             JOIN users u ON u.id = c.user_id
             WHERE c.id = $1",
        )
        .bind(coach_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::failed(COACH_NOT_FOUND))?;

        Ok(CoachWithUser {
            user: CoachUserInfo {
                name: row.name,
                role: row.role,
            },
            coach: row.coach,
        })
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "courses"))]
    pub async fn get_coach_courses(
        db: &PgPool,
        coach_id: Uuid,
    ) -> Result<Vec<CoachCourseItem>, AppError> {
        let user_id = sqlx::query_scalar::<_, Uuid>("SELECT user_id FROM coaches WHERE id = $1")
            .bind(coach_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::failed(COACH_NOT_FOUND))?;

        let courses = sqlx::query_as::<_, CoachCourseItem>(
            "SELECT c.id, c.name, c.description, c.start_at, c.end_at, c.max_participants,
                    s.name AS skill_name
             FROM courses c
             JOIN skills s ON s.id = c.skill_id
             WHERE c.user_id = $1
             ORDER BY c.start_at",
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(courses)
    }
}
