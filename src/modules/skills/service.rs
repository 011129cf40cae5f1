use livefit_core::AppError;
use livefit_core::validation::{DUPLICATE_DATA, INVALID_ID, STILL_IN_USE};
use livefit_db::{is_foreign_key_violation, unique_violation};
use livefit_models::{CreateSkillDto, Skill, SkillSummary};
use sqlx::PgPool;
use tracing::{info, instrument, warn};
use uuid::Uuid;

pub struct SkillService;

impl SkillService {
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "skills"))]
    pub async fn get_skills(db: &PgPool) -> Result<Vec<SkillSummary>, AppError> {
        let skills = sqlx::query_as::<_, SkillSummary>("SELECT id, name FROM skills ORDER BY name")
            .fetch_all(db)
            .await?;

        Ok(skills)
    }

    #[instrument(skip(db, dto), fields(skill.name = %dto.name, db.operation = "INSERT", db.table = "skills"))]
    pub async fn create_skill(db: &PgPool, dto: CreateSkillDto) -> Result<Skill, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM skills WHERE name = $1)")
                .bind(&dto.name)
                .fetch_one(db)
                .await?;
        if exists {
            warn!("duplicate skill name");
            return Err(AppError::conflict(anyhow::anyhow!(DUPLICATE_DATA)));
        }

        let skill = sqlx::query_as::<_, Skill>(
            "INSERT INTO skills (name) VALUES ($1) RETURNING id, name, created_at",
        )
        .bind(&dto.name)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if unique_violation(&e).is_some() {
                return AppError::conflict(anyhow::anyhow!(DUPLICATE_DATA));
            }
            AppError::from(e)
        })?;

        info!(skill.id = %skill.id, "skill created");
        Ok(skill)
    }

    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "skills"))]
    pub async fn delete_skill(db: &PgPool, skill_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(skill_id)
            .execute(db)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    warn!("delete refused, rows still reference it");
                    return AppError::conflict(anyhow::anyhow!(STILL_IN_USE));
                }
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::failed(INVALID_ID));
        }

        info!("skill deleted");
        Ok(())
    }
}
