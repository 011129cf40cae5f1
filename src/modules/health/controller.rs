//! Liveness check used by load balancers and container orchestrators.

use axum::{Json, extract::State};
use livefit_core::AppError;
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use crate::docs::ErrorResponse;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
}

/// Reports `ok` once the database answers.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and database are reachable", body = HealthResponse),
        (status = 500, description = "Database unreachable", body = ErrorResponse)
    ),
    tag = "Health"
)]
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    sqlx::query("SELECT 1").execute(&state.db).await?;
    Ok(Json(HealthResponse { status: "ok".to_string() }))
}
